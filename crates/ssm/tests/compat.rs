//! Envelopes sealed by earlier releases must keep opening.

use secrecy::SecretString;
use serde_json::json;
use ssm::{Ssm, SsmError, DEFAULT_SEPARATOR};
use ssm_crypto::checksum;

/// AES envelope from release 0.1.2, key "AwesomeKey".
const V0_1_2_GITHUB: &str = r#"
    {
      "public": {
        "version": "0.1.2",
        "encryption": "AES",
        "metadata": {
          "color": "6463fb",
          "keys": 1,
          "name": "GitHub"
        }
      },
      "private": "sPM54nv2F42RwZniPW4EmNz2P0i4l5Lxa/j0szQXFN6umTRDb+IxFjBzjLaAYeq/Zr2HSC6uugPQJ1k=",
      "protected": "JJCY4C8hR+o2MTjNR/7WwIBHkA54A8VAEDhn7pN7qT7Vov4Ud3k1tcP3C5mMLykwMOncJoVs7ZlkFVkAsHRgla6featTZvyOgW7BcEZfJX3VTypH6O6zLVbRxr5K+mijpWzq2t78KAISaej6PFefUxoS3BusleFGjjQP+DVN8Gb9t8WUY+Oh032LXrzsGnbKeB249LZ4B+qhG6TdjKs6ZMoPdTEZxfjFM9T+8fEcsdm+ShQApZgdokdIDfxwV3j7CwIewwc="
    }
"#;

/// Single-fragment AES envelope from release 0.1.2 with protected
/// timestamps, key "AwesomeKey".
const V0_1_2_SIMPLE: &str = r#"
{
  "public": {
    "version": "0.1.2",
    "encryption": "AES",
    "metadata": { "color": "6463fb", "keys": 1, "name": "GitHub" }
  },
  "private": "udif2nhqJCcQamkaTnYh4PQxQolZDReB+MRQZZ74eANGsVJLWJ7edLdA8zUQfklQtS1nHCjRyc1Ami8=",
  "protected": "UO7zqefb92GXVFv9mpmDqhFooRz+7kjNftsD7zRzaGacDhZuXWUVxl48vh913h/u0HK/w0Bb7ErHq/9Bmj+vDSHAtp5Z0N73F0UDijFe+HqExTivKw1DyJnxoPrb3WYE5UZ8NyIVvD0gNUIuOavGBNzaeAGlhM8Ub8I1gJ/cKoAEpKIvzMP5dJKIR1KJ1OcUuTe45p65yruus7eoUifl5NLm9nVH4aXJvmVp+xVM9NIIrUR6/WuXPVamR5VA5EnZ+Gy4Nx5S+Ewyfp+AAh7LEXvwaZuuxPRPwgdAQ4V7cUYocoLMyD1CsGhKVAO+RoBnury1WDnkrOiJPdSFm1ovxG1Gc/m2cREmndC/5EKJh0xGMCCZdXm+LQb7FIIYr8+7eeBH7JeUCeKRqR9VEE3Qcxj9n13htzcItlzXKR8io1FQ7/1iwOIB1g1Qlqwa8G7vKHpzNMCEwtO4eheQ4EHkS40/zQ=="
}
"#;

/// Envelope from release 0.1.2 whose fragments are [child, text, text, child],
/// key "BreathtakingKey". The child envelope is sealed with "AwesomeKey".
const V0_1_2_COMPOSED: &str = r#"
{
  "public": { "version": "0.1.2", "encryption": "AES", "metadata": null },
  "private": "4zMsjvYNT+NNMLeotmfXEDw8wff40JURPgYKumoajpCWA8Cnqilm6rbnxHK2oakaIbIdPZwbzthjBUbGYO/BToj8JDgMfL0ST+kDrcFUC3vjwWk6GEeSK7HwNJDotRSQBvmzQU1LI/MGDQLgpArLhIZk8dolX+mQ2FIOBUQC6JvyGS16k/FsseIlqcIQba9TDb54ZoB+F5EgDYBDFQtAImby8sXwAW03vbl82x2ntz9+eK4Fmz1Jh2V5Qg1UwHWUEkX937s8hz24M0JK+WbCNC2+Kh0MKXS08ZsspHjfTUEFpYpugGAN5I0KLLeKP+t8KHyHlOhMCMg8epqZmW/LTsuUcy1IUWGlAovdbSWJZ83BRFebe2aFJg0lW4OJzaULeSQHQZly44v344ZfjLwVWHLJ4Hi39XPGXkXqJftNpjhdWaamxGrqIO0rc/kYb0wzyYeg09b3c9+S60GgB4DVf5TrMeYLkszStEaLK5X8KdrFoJh3/q3dn3ycmSZUKu0eIsPCNSYNOEE6/Rwc7KDoM5TDvekztANGkby5WZ/ODRvcyKgBWlo+Q6qA21Q606iUu5A/oc1ib4C1r3H/BLZfEDiGp41Snj+vOpCDrbJCbpL4oyNTp1wDSrVzD3bbWfrPeUj4UMmv2usfHOinl51phXgzLme/P1TvZecOWqD34IvHvF/hb/4NU2sXFGP3jwEZsn5cRqVjqztQ8jfd+59bJHLztwpsOYsJ+Z+U/imKjkFfdxkR81u6wP6mQkzlZckX+teGUneb+bTbyPTg0fgxmWCmgiDJzsADHGgfgbCdUpP6ZBt4Coc7gNqmX11mqs6tvu7Ct0j0X23rnhGlD/dN6KVxA1Tt4J/faoZvFZ8wDBaO76OmeoDeoXGPuesG2MpfRXxhOgY1l5BGgt+8SD7guUZ4RBQPSN8Hqyih2v3wwYivm/qXbkDbPZAQk4glPr+NuQQiNoFmqzL/PFd3i5kWAf2PJQm7aHcdNSctmKM2cPW0vyCCOJFboWNRm+qICYJz45v9da1sxOQNNL0CBF9ZsSeB7eWrggoheL0hD4pEHiv5G6H6mHIhRgqX0ZTSD8kzFDc21AvL3RmyDQSWJ1UGwMQG+d6p/9uyulPL1qe8kZIEP+wPRLj+bbTzK9QLs68TnigJX9HthcTVp3HWMeyJb7SZsYc6WQJdyuLGDZ4sEnlGFu3jF+BOZAGJu125S15Qtcr7x4sbXIATL3BfgAIoUmaJkAbm2pGwyEpYzlwzJLByyOF9W0TCjcnmbjmRHmpMaoCKWdLTE3k2EFNP4muTXw88Wm7MNdZSorAuX/3+FhaGM4ue2pH3AGug3ZzmDLu/jrwi5rgTWMXacd7OUhiFPsJXhgBQkT5yA2dwZakDUP/GzzX/GwyUsgjC3BXUPvOOsPKAXbT/T75ClTWPOAdjH9UM3y3ak4bHR8n7GocarozgtbHBfZpmAA3nnA2jPj03O/OOl8R7TwGCkoIneWVAuaQk1jlz7yXMc8o3qtYimIUG0+b+VypChg5ZRhqHJeGiXVL2XVIpKRunXpTkc6/Q1zfHWpi2I7j813089SrmrwkgA2sOh9LZ3wnDuCt/Hcgck0YI/oz2m+jrHhVx09hcK3DQSvAsq8c0i8ZKJ2K/clyCe2m6E2R5vW0iAwz8Entyj4geQVc5IhIWzGRiPor16adivGUp7EGQUF1OYkvm02iqtVHbHV9coJKrxLiqDZrds67A+QH+2+kO1hJ4IbRgZMANEwkQbOrK2e/REGvWMwIfoU4CgvgCuTIJcopOjhkt/Lp30q0er1hZV1p++b+bgmq+AdMNPKqKrY+5dUm30Hx/lDgQcYr4TNyl/bK0lVr4k0cdMSneYBhBth2ygVHWZPnSUGHK1v3iTQOWmSvO5kTEb1fkuJ1+wMhoiyUJ3cuVyvqnAA==",
  "protected": "/VL1wlMYsU+ftYLyt6+koj3zsdr/BoilGuY5FWoX9RDaExJmaBQTa5WFsv6n7qSDiqrwF3taVPoEb46pAn7oDBZtZvuBy6pftG1Je54xs8kXlGMnJi6IGL9fXmIM7bGT/oG6ak/vv6KSKnZabBA58HUmFAnIB3VYJvf0dJ5gxHcqKOsYkCGA2yddJtcOW/DXCzRQagt/fNHkPrrcDx8i5yyWJwfVG7XLrwRnOBKGSkRB0ILFz6iKps40q3y3QtEJIaI="
}
"#;

#[test]
fn parses_release_0_1_2_envelope() {
    let ssm = Ssm::new().unwrap();
    let secret = ssm.parse(V0_1_2_GITHUB.as_bytes()).unwrap();

    assert_eq!(secret.public.version, "0.1.2");
    assert_eq!(secret.public.encryption, "AES");
    assert_eq!(
        secret.public.metadata,
        json!({ "color": "6463fb", "keys": 1, "name": "GitHub" })
            .as_object()
            .cloned()
    );
    // nonce (12) + "https://github.com/neoxelox/ssm" (31) + tag (16)
    assert_eq!(secret.size(), 59);
}

#[test]
fn tells_release_0_1_2_envelope() {
    let ssm = Ssm::new().unwrap();
    let secret = ssm.parse(V0_1_2_GITHUB.as_bytes()).unwrap();

    let fact = secret
        .tell(&ssm, &SecretString::from("AwesomeKey"))
        .unwrap();

    assert_eq!(fact.private, vec![b"https://github.com/neoxelox/ssm".to_vec()]);
    assert_eq!(fact.protected.separator, DEFAULT_SEPARATOR.as_bytes());
    assert_eq!(fact.protected.checksum, checksum(&secret.private));
    assert!(fact.protected.metadata.is_none());
}

#[test]
fn release_0_1_2_envelope_rejects_other_keys() {
    let ssm = Ssm::new().unwrap();
    let secret = ssm.parse(V0_1_2_GITHUB.as_bytes()).unwrap();

    assert_eq!(
        secret.tell(&ssm, &SecretString::from("NotTheKey")),
        Err(SsmError::DecryptionFailed)
    );
}

#[test]
fn tells_release_0_1_2_protected_metadata() {
    let ssm = Ssm::new().unwrap();
    let secret = ssm.parse(V0_1_2_SIMPLE.as_bytes()).unwrap();
    let fact = secret
        .tell(&ssm, &SecretString::from("AwesomeKey"))
        .unwrap();

    assert_eq!(fact.private, vec![b"https://github.com/neoxelox/ssm".to_vec()]);
    assert_eq!(fact.protected.checksum, checksum(&secret.private));
    assert_eq!(
        fact.protected.metadata,
        json!({
            "created_at": "2020-08-22T15:36:24.96887154+02:00",
            "last_change_at": "2020-08-22T15:36:24.968872092+02:00",
            "last_view_at": "2020-08-22T15:36:24.968871871+02:00"
        })
        .as_object()
        .cloned()
    );
}

#[test]
fn tells_release_0_1_2_composed_envelope() {
    let ssm = Ssm::new().unwrap();
    let parent = ssm
        .parse(V0_1_2_COMPOSED.as_bytes())
        .unwrap()
        .tell(&ssm, &SecretString::from("BreathtakingKey"))
        .unwrap();

    assert!(parent.public.metadata.is_none());
    assert_eq!(parent.size(), 4);
    assert_eq!(parent.private[1], b"I'm the parent");
    assert_eq!(parent.private[2], b"Awesome!");
    assert_eq!(parent.private[0], parent.private[3]);

    let child_secret = ssm.parse(&parent.private[0]).unwrap();
    assert_eq!(child_secret.public.version, "0.0.1");

    let child = child_secret
        .tell(&ssm, &SecretString::from("AwesomeKey"))
        .unwrap();
    assert_eq!(child.private, vec![b"https://github.com/neoxelox/ssm".to_vec()]);
    assert_eq!(
        child.public.metadata,
        json!({ "color": "6463fb", "keys": 1, "name": "GitHub" })
            .as_object()
            .cloned()
    );
    assert_eq!(
        child.protected.metadata.unwrap()["created_at"],
        json!("2020-08-22T15:41:29.402829332+02:00")
    );
}
