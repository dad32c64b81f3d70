//! Integration tests for netspace
//!
//! These tests exercise the address algebra end to end through the public
//! API: summarization, gap finding and the properties tying them together.

use netspace::{Address, AddressSpace, Family, FormatOptions, HostAddress};

fn v4(s: &str) -> Address {
    Address::from_string(s, None, Family::Ipv4).unwrap()
}

fn v4_space(networks: &[&str], bound: Option<&str>) -> AddressSpace {
    AddressSpace::with_family(Family::Ipv4, networks.iter().copied(), bound.map(v4))
        .expect("Failed to build address space")
}

#[test]
fn test_summarize_adjacent_pair() {
    let space = v4_space(&["1.0.0.0/24", "1.0.1.0/24"], None);
    assert_eq!(space.summarize().networks(), &[v4("1.0.0.0/23")]);
}

#[test]
fn test_summarize_with_backtracking() {
    let space = v4_space(
        &["1.0.0.0/24", "1.0.1.0/25", "1.0.1.128/26", "1.0.1.192/26"],
        None,
    );
    assert_eq!(space.summarize().networks(), &[v4("1.0.0.0/23")]);
}

#[test]
fn test_summarize_with_pairs() {
    assert_eq!(
        v4("1.0.0.0/24").summarize_with(&v4("1.0.1.0/24")),
        Some(v4("1.0.0.0/23"))
    );
    assert_eq!(v4("1.0.2.0/24").summarize_with(&v4("1.0.0.0/24")), None);
}

#[test]
fn test_gaps_within_bound() {
    let space = v4_space(&["1.0.1.0/24", "1.0.128.0/17"], Some("1.0.0.0/16"));
    let expected: Vec<Address> = [
        "1.0.0.0/24",
        "1.0.2.0/23",
        "1.0.4.0/22",
        "1.0.8.0/21",
        "1.0.16.0/20",
        "1.0.32.0/19",
        "1.0.64.0/18",
    ]
    .iter()
    .map(|t| v4(t))
    .collect();
    assert_eq!(space.gaps().networks(), expected.as_slice());
}

#[test]
fn test_gaps_of_empty_space_is_the_bound() {
    let space = v4_space(&[], Some("1.0.0.0/8"));
    assert_eq!(space.gaps().networks(), &[v4("1.0.0.0/8")]);
}

#[test]
fn test_gaps_and_networks_tile_the_bound() {
    let space = v4_space(&["1.0.1.0/24", "1.0.128.0/17"], Some("1.0.0.0/16"));
    let gaps = space.gaps();

    // every piece sits inside the bound, and no two pieces overlap
    let tiles = gaps
        .summarize()
        .union(&space.summarize())
        .expect("same family");
    let bound = v4("1.0.0.0/16");
    for network in tiles.networks() {
        assert!(bound.cover(network).unwrap(), "{network} outside bound");
    }
    for pair in tiles.networks().windows(2) {
        assert!(
            !pair[0].overlap(&pair[1]).unwrap(),
            "{} overlaps {}",
            pair[0],
            pair[1]
        );
    }

    // together the pieces are exactly the bound
    assert_eq!(tiles.summarize().networks(), &[bound]);
}

#[test]
fn test_summarize_is_idempotent() {
    let space = v4_space(&["1.0.0.0/24", "1.0.1.0/24", "1.0.4.0/24"], None);
    let once = space.summarize();
    assert_eq!(once.summarize(), once);
}

#[test]
fn test_gap_computation_is_deterministic() {
    let space = v4_space(&["10.0.3.0/24", "10.0.9.0/24"], Some("10.0.0.0/16"));
    assert_eq!(space.gaps(), space.gaps());
}

#[test]
fn test_cidr_round_trip() {
    let canonical = [
        "1.0.0.0/24",
        "10.0.0.1/32",
        "2001:db8::/32",
        "::1/128",
        "aa:bb:cc:00:00:00/24",
    ];
    for text in canonical {
        let address: Address = text.parse().expect("Failed to parse");
        assert_eq!(address.to_string(), text, "round trip for {text}");
    }
}

#[test]
fn test_mask_idempotence() {
    for prefix in [0u8, 1, 8, 23, 24, 32] {
        let masked = v4("192.168.37.201").mask(prefix).unwrap();
        assert_eq!(masked.mask(prefix).unwrap(), masked);
    }
}

#[test]
fn test_grow_shrink_inverse() {
    let address = v4("10.20.30.40");
    for prefix in [8u8, 16, 24, 32] {
        let masked = address.mask(prefix).unwrap();
        for shift in 0..=prefix {
            assert_eq!(
                masked.grow(shift).unwrap().shrink(shift).unwrap(),
                masked,
                "grow({shift})/shrink({shift}) at /{prefix}"
            );
        }
    }
}

#[test]
fn test_cover_reflexivity_and_antisymmetry() {
    let networks = [v4("10.0.0.0/8"), v4("10.1.0.0/16"), v4("10.1.2.3/32")];
    for a in &networks {
        assert!(a.cover(a).unwrap(), "{a} must cover itself");
        for b in &networks {
            if a.cover(b).unwrap() && b.cover(a).unwrap() {
                assert_eq!(a.network_base(), b.network_base());
                assert_eq!(a.prefix_length(), b.prefix_length());
            }
        }
    }
}

#[test]
fn test_families_never_mix() {
    let four = v4("10.0.0.0/8");
    let six = Address::from_string("2001:db8::/32", None, Family::Ipv6).unwrap();
    assert!(four.cover(&six).is_err());
    assert!(four.overlap(&six).is_err());
    assert_ne!(four, six);

    let v4s = v4_space(&["10.0.0.0/8"], None);
    let v6s = AddressSpace::with_family(Family::Ipv6, ["2001:db8::/32"], None).unwrap();
    assert!(v4s.union(&v6s).is_err());
}

#[test]
fn test_host_view_round_trip() {
    let host = HostAddress::try_from(v4("10.0.0.1")).unwrap();
    assert_eq!(host.size(), 1);
    assert_eq!(Address::from(host), v4("10.0.0.1"));
    assert!(HostAddress::try_from(v4("10.0.0.0/24")).is_err());
}

#[test]
fn test_expanded_ipv6_formatting() {
    let address = Address::from_string("2001:db8::1/64", None, Family::Ipv6).unwrap();
    assert_eq!(
        address.format_with(FormatOptions { cidr: true, expand: true }),
        "2001:0db8:0000:0000:0000:0000:0000:0001/64"
    );
    assert_eq!(
        address.format_with(FormatOptions { cidr: false, expand: false }),
        "2001:db8::1"
    );
}

#[test]
fn test_mac_space_algebra() {
    let space = AddressSpace::with_family(
        Family::Mac,
        ["aa:bb:cc:00:00:00/40", "aa:bb:cc:00:01:00/40"],
        None,
    )
    .unwrap();
    let expected = Address::from_string("aa:bb:cc:00:00:00/39", None, Family::Mac).unwrap();
    assert_eq!(space.summarize().networks(), &[expected]);
}
