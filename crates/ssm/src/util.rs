const BASE: usize = 1024;
const UNITS: &[u8] = b"KMGTPE";

/// Render a length with binary units: `512B`, `1.5KB`, `3.0MB`.
pub fn byte_size(length: usize) -> String {
    if length < BASE {
        return format!("{length}B");
    }

    let mut div = BASE as f64;
    let mut exp = 0;
    let mut n = length / BASE;
    while n >= BASE && exp + 1 < UNITS.len() {
        div *= BASE as f64;
        exp += 1;
        n /= BASE;
    }

    format!("{:.1}{}B", length as f64 / div, UNITS[exp] as char)
}
