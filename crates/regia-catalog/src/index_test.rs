use std::collections::BTreeMap;
use std::path::PathBuf;

use regia_core::{Money, FALLBACK_HEX};

use super::*;

fn config(category: &str, rules: &[[u32; 2]]) -> CatalogConfig {
    CatalogConfig {
        category: category.to_string(),
        directory: PathBuf::from("Sastrero"),
        file_prefix: "sastrero".to_string(),
        display_prefix: "Sastrero".to_string(),
        collapse_rules: rules.iter().copied().map(CollapseRule::from).collect(),
        overrides: BTreeMap::new(),
    }
}

fn assets(numbers: &[u32]) -> Vec<ImageAsset> {
    numbers
        .iter()
        .map(|n| ImageAsset {
            number: *n,
            filename: format!("sastrero{n}.jpeg"),
            path: PathBuf::from(format!("/assets/Sastrero/sastrero{n}.jpeg")),
        })
        .collect()
}

#[test]
fn range_with_gap_emits_one_group_with_available_images() {
    let indexed = index_assets(&config("sastrero", &[[4, 6]]), assets(&[4, 6]), "/images");

    assert_eq!(indexed.groups.len(), 1);
    let group = &indexed.groups[0];
    assert_eq!(group.id, 4);
    assert_eq!(group.image_numbers, vec![4, 6]);
    assert_eq!(group.loaders.len(), 2);
    assert_eq!(
        indexed.report.warnings,
        vec![IndexWarning::PartialRange {
            rule: CollapseRule::new(4, 6),
            missing: vec![5],
            missing_count: 1,
        }]
    );
}

#[test]
fn every_asset_lands_in_exactly_one_group() {
    let numbers = [1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 16, 19];
    let cfg = config("sastrero", &[[1, 3], [4, 6], [10, 11], [14, 15]]);
    let indexed = index_assets(&cfg, assets(&numbers), "/images");

    let mut seen: Vec<u32> = indexed
        .groups
        .iter()
        .flat_map(|g| g.image_numbers.iter().copied())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, numbers.to_vec());

    let loader_total: usize = indexed.groups.iter().map(|g| g.loaders.len()).sum();
    assert_eq!(loader_total, numbers.len());
}

#[test]
fn groups_are_sorted_by_representative() {
    let cfg = config("sastrero", &[[10, 11], [1, 3]]);
    let indexed = index_assets(&cfg, assets(&[1, 2, 3, 5, 10, 11, 12]), "/images");
    let ids: Vec<u32> = indexed.groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 5, 10, 12]);
}

#[test]
fn singleton_groups_for_uncovered_images() {
    let indexed = index_assets(&config("vestidos", &[]), assets(&[7, 3]), "/images");
    let ids: Vec<u32> = indexed.groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![3, 7]);
    assert!(indexed.groups.iter().all(|g| g.loaders.len() == 1));
    assert!(indexed.report.is_clean());
}

#[test]
fn representative_is_lowest_present_number() {
    let indexed = index_assets(&config("sastrero", &[[1, 3]]), assets(&[2, 3]), "/images");
    assert_eq!(indexed.groups[0].id, 2);
    assert_eq!(indexed.groups[0].uid, "sastrero-2");
}

#[test]
fn empty_range_is_reported_not_emitted() {
    let indexed = index_assets(&config("sastrero", &[[20, 21]]), assets(&[1]), "/images");
    assert_eq!(indexed.groups.len(), 1);
    assert_eq!(
        indexed.report.warnings,
        vec![IndexWarning::EmptyRange {
            rule: CollapseRule::new(20, 21)
        }]
    );
}

#[test]
fn empty_asset_set_yields_empty_catalog() {
    let indexed = index_assets(&config("sastrero", &[[1, 3]]), Vec::new(), "/images");
    assert!(indexed.groups.is_empty());
    assert_eq!(indexed.report.asset_count, 0);
    assert_eq!(indexed.report.group_count, 0);
}

#[test]
fn overlapping_rules_do_not_duplicate_images() {
    let indexed = index_assets(
        &config("sastrero", &[[1, 3], [3, 4]]),
        assets(&[1, 2, 3, 4]),
        "/images",
    );
    let members: Vec<Vec<u32>> = indexed.groups.iter().map(|g| g.image_numbers.clone()).collect();
    assert_eq!(members, vec![vec![1, 2, 3], vec![4]]);
}

#[test]
fn files_sharing_a_number_stay_in_the_same_group() {
    let mut list = assets(&[1, 2]);
    list.push(ImageAsset {
        number: 2,
        filename: "sastrero2.webp".to_string(),
        path: PathBuf::from("/assets/Sastrero/sastrero2.webp"),
    });
    let indexed = index_assets(&config("sastrero", &[[1, 2]]), list, "/images");
    assert_eq!(indexed.groups.len(), 1);
    assert_eq!(indexed.groups[0].loaders.len(), 3);
    assert_eq!(indexed.report.asset_count, 3);
}

#[test]
fn default_name_slug_and_route() {
    let indexed = index_assets(&config("sastrero", &[]), assets(&[7]), "/images");
    let group = &indexed.groups[0];
    assert_eq!(group.name, "Sastrero 07");
    assert_eq!(group.slug, "7-sastrero-07");
    assert_eq!(group.route, "/product/sastrero/7/7-sastrero-07");
    assert!(group.price.is_none());
    assert_eq!(group.price_label(), "Consultar");
    assert!(group.colors.is_none());
    assert!(group.sizes.is_none());
}

#[test]
fn overrides_apply_name_price_colors_and_sizes() {
    let mut cfg = config("sastrero", &[[14, 15]]);
    cfg.overrides.insert(
        14,
        GroupOverride {
            name: Some(" Blazer ARMANI ".to_string()),
            price: Money::parse("60000"),
            colors: Some(vec!["Negro".to_string(), "Turquesa".to_string()]),
            sizes: Some(vec!["1".to_string(), "2".to_string()]),
        },
    );
    let indexed = index_assets(&cfg, assets(&[14, 15]), "/images");
    let group = &indexed.groups[0];

    assert_eq!(group.name, "Blazer ARMANI");
    assert_eq!(group.slug, "14-blazer-armani");
    assert_eq!(group.price_label(), "$ 60.000,00");
    let colors = group.colors.as_ref().unwrap();
    assert_eq!(colors[0].hex, "#000000");
    assert_eq!(colors[1].hex, FALLBACK_HEX);
    assert_eq!(group.sizes.as_deref().map(<[String]>::len), Some(2));
}

#[test]
fn override_for_absorbed_number_is_orphaned() {
    let mut cfg = config("sastrero", &[[14, 15]]);
    cfg.overrides.insert(15, GroupOverride::default());
    let indexed = index_assets(&cfg, assets(&[14, 15]), "/images");
    assert_eq!(
        indexed.report.warnings,
        vec![IndexWarning::OrphanOverride { id: 15 }]
    );
}

#[test]
fn loaders_carry_public_urls_in_order() {
    let indexed = index_assets(&config("sastrero", &[[1, 3]]), assets(&[3, 1, 2]), "/images/");
    let group = &indexed.groups[0];
    let urls: Vec<&str> = group.loaders.iter().map(ImageLoader::url).collect();
    assert_eq!(
        urls,
        vec![
            "/images/Sastrero/sastrero1.jpeg",
            "/images/Sastrero/sastrero2.jpeg",
            "/images/Sastrero/sastrero3.jpeg",
        ]
    );
    assert_eq!(
        group.primary_loader().map(ImageLoader::url),
        Some("/images/Sastrero/sastrero1.jpeg")
    );
}

#[test]
fn warning_messages_are_readable() {
    let warning = IndexWarning::PartialRange {
        rule: CollapseRule::new(4, 7),
        missing: vec![5, 6],
        missing_count: 2,
    };
    assert_eq!(warning.to_string(), "collapse rule [4, 7] is missing images 5, 6");

    let truncated = IndexWarning::PartialRange {
        rule: CollapseRule::new(1, 100),
        missing: vec![2, 3],
        missing_count: 98,
    };
    assert_eq!(
        truncated.to_string(),
        "collapse rule [1, 100] is missing 98 images (first: 2, 3, ...)"
    );
}

#[test]
fn very_wide_rule_reports_a_bounded_gap() {
    let indexed = index_assets(
        &config("sastrero", &[[1, 4_000_000_000]]),
        assets(&[1, 3]),
        "/images",
    );

    assert_eq!(indexed.groups.len(), 1);
    assert_eq!(indexed.groups[0].image_numbers, vec![1, 3]);
    let [IndexWarning::PartialRange {
        missing,
        missing_count,
        ..
    }] = indexed.report.warnings.as_slice()
    else {
        panic!("expected one partial range warning");
    };
    assert_eq!(*missing_count, 3_999_999_998);
    assert_eq!(missing.len(), MISSING_SAMPLE);
    assert_eq!(missing[..3], [2, 4, 5]);
}

#[test]
fn inverted_rule_matches_nothing() {
    let indexed = index_assets(&config("sastrero", &[[5, 2]]), assets(&[2, 5]), "/images");

    assert_eq!(indexed.groups.len(), 2);
    assert_eq!(
        indexed.report.warnings,
        vec![IndexWarning::EmptyRange {
            rule: CollapseRule::new(5, 2),
        }]
    );
}
