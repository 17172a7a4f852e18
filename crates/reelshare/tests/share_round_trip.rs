//! End-to-end sharing scenarios: encode on one side, decode as a hostile
//! stranger on the other.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;
use reelshare::codec::Lz4UrlCodec;
use reelshare::registry::{ShortCode, ShortCodeRegistry};
use reelshare::{FilmKey, decode_share, share_url};

fn festival_registry() -> ShortCodeRegistry {
    let films = [
        "no-other-land-2024",
        "flow-2024",
        "anora-2024",
        "the-brutalist-2024",
        "emilia-perez-2024",
        "the-seed-of-the-sacred-fig-2024",
        "all-we-imagine-as-light-2024",
        "nickel-boys-2024",
    ];
    let mut registry = ShortCodeRegistry::default();
    for film in films {
        registry.allocate(film).unwrap();
    }
    registry
}

fn favs_param(url: &str) -> &str {
    url.split("favs=").nth(1).expect("url has favs parameter")
}

#[test]
fn shared_list_survives_the_full_trip() {
    let registry = festival_registry();
    let codec = Lz4UrlCodec;
    let picks = [
        "flow-2024".to_string(),
        "anora-2024".to_string(),
        "nickel-boys-2024".to_string(),
    ];
    let priorities = HashSet::from(["anora-2024".to_string()]);

    let url = share_url(
        &registry,
        &codec,
        "https://reelkeeper.example",
        &picks,
        &priorities,
        Some("cannes favorites"),
    );
    assert!(url.starts_with("https://reelkeeper.example/shared-favorites?name=cannes%20favorites&favs="));

    let share = decode_share(&registry, &codec, favs_param(&url)).unwrap();
    assert_eq!(
        share.film_keys,
        picks
            .iter()
            .map(|k| FilmKey::parse(k).unwrap())
            .collect::<Vec<_>>()
    );
    assert_eq!(
        share.priorities,
        BTreeSet::from([FilmKey::parse("anora-2024").unwrap()])
    );
}

#[test]
fn hundreds_of_films_fit_in_a_url() {
    let mut registry = ShortCodeRegistry::default();
    let picks: Vec<String> = (0..400).map(|i| format!("festival-film-{i:03}")).collect();
    for film in &picks {
        registry.allocate(film.clone()).unwrap();
    }
    let codec = Lz4UrlCodec;

    let url = share_url(
        &registry,
        &codec,
        "https://reelkeeper.example",
        &picks,
        &HashSet::new(),
        None,
    );
    // 400 films at 3 chars each is 1200 code characters before compression;
    // the link has to stay well under common browser URL limits.
    assert!(url.len() < 2000, "url is {} chars", url.len());

    let share = decode_share(&registry, &codec, favs_param(&url)).unwrap();
    assert_eq!(share.film_keys.len(), 400);
}

#[test]
fn decoding_a_stale_link_after_catalog_removal() {
    let mut registry = festival_registry();
    let codec = Lz4UrlCodec;
    let picks = ["flow-2024".to_string(), "anora-2024".to_string()];
    let url = share_url(
        &registry,
        &codec,
        "https://reelkeeper.example",
        &picks,
        &HashSet::new(),
        None,
    );

    // The catalog moves on: same codes, but anora's entry is gone.
    let keep: Vec<(String, ShortCode)> = picks
        .iter()
        .take(1)
        .map(|k| (k.clone(), registry.code_for(k).unwrap()))
        .collect();
    registry = ShortCodeRegistry::from_entries(keep).unwrap();

    let share = decode_share(&registry, &codec, favs_param(&url)).unwrap();
    assert_eq!(share.film_keys, vec![FilmKey::parse("flow-2024").unwrap()]);
}

proptest! {
    /// Round-trip property: any resolvable, de-duplicated selection decodes
    /// back to itself in order, with priorities intact.
    #[test]
    fn encode_decode_round_trip(
        indices in proptest::collection::vec(0usize..8, 1..8),
        priority_mask in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let registry = festival_registry();
        let codec = Lz4UrlCodec;
        let films = [
            "no-other-land-2024",
            "flow-2024",
            "anora-2024",
            "the-brutalist-2024",
            "emilia-perez-2024",
            "the-seed-of-the-sacred-fig-2024",
            "all-we-imagine-as-light-2024",
            "nickel-boys-2024",
        ];

        let picks: Vec<String> = indices.iter().map(|&i| films[i].to_string()).collect();
        let priorities: HashSet<String> = films
            .iter()
            .zip(&priority_mask)
            .filter(|(_, &p)| p)
            .map(|(f, _)| (*f).to_string())
            .collect();

        let url = share_url(&registry, &codec, "https://reelkeeper.example", &picks, &priorities, None);
        let share = decode_share(&registry, &codec, favs_param(&url)).unwrap();

        // Expected: first-seen de-duplication of the picks.
        let mut expected = Vec::new();
        for pick in &picks {
            let key = FilmKey::parse(pick).unwrap();
            if !expected.contains(&key) {
                expected.push(key);
            }
        }
        prop_assert_eq!(&share.film_keys, &expected);

        // Every decoded priority was requested and survived de-duplication.
        for key in &share.priorities {
            prop_assert!(priorities.contains(key.as_str()));
            prop_assert!(expected.contains(key));
        }
        // And every requested priority that made it into the list decoded.
        for pick in &expected {
            if priorities.contains(pick.as_str()) {
                prop_assert!(share.priorities.contains(pick));
            }
        }
    }
}
