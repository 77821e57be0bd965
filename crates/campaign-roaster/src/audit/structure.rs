use super::campaign::{CampaignAggregate, StructureCounts};
use super::domain::CampaignId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structural archetype assigned to every campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StructureType {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    Unknown,
}

/// How a structure type is judged when presenting results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureRating {
    Good,
    Okay,
    Bad,
}

impl StructureType {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::A,
            Self::B,
            Self::C,
            Self::D,
            Self::E,
            Self::F,
            Self::G,
            Self::H,
            Self::I,
            Self::J,
            Self::Unknown,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
            Self::I => "I",
            Self::J => "J",
            Self::Unknown => "Unknown",
        }
    }

    /// Types counted towards the good-structure percentage.
    pub const fn is_good(self) -> bool {
        matches!(self, Self::A | Self::D | Self::F | Self::G)
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::A => "The Granular Optimizer (SKAG/SPAG)",
            Self::B => "The Mixed-Targeting Campaign",
            Self::C => "The 'Kitchen Sink'",
            Self::D => "The Organized Keyword Campaign",
            Self::E => "The Complex Keyword Campaign",
            Self::F => "The Product Targeting (PAT) Campaign",
            Self::G => "The Themed Ad Group (STAG)",
            Self::H => "The Messy Ad Group",
            Self::I => "The Multi-ASIN Ad Group (Single Target)",
            Self::J => "The Multi-ASIN Ad Group (Multi-Target)",
            Self::Unknown => "Unknown Structure",
        }
    }

    pub const fn conditions(self) -> &'static str {
        match self {
            Self::A => "1 Ad Group, 1 ASIN, 1 Target.",
            Self::B => ">1 Ad Group, 1 ASIN, contains both Keywords and Product Targets.",
            Self::C => ">1 Ad Group, >1 ASIN.",
            Self::D => ">1 Ad Group, 1 ASIN, Keywords only, a single Match Type.",
            Self::E => ">1 Ad Group, 1 ASIN, Keywords only, >1 Match Types.",
            Self::F => ">1 Ad Group, 1 ASIN, Product Targets only.",
            Self::G => "1 Ad Group, 1 ASIN, >1 Targets, all with the same match type.",
            Self::H => "1 Ad Group, 1 ASIN, >1 Targets with different match types.",
            Self::I => "1 Ad Group, >1 ASIN, 1 Target.",
            Self::J => "1 Ad Group, >1 ASIN, >1 Target.",
            Self::Unknown => "The structure does not fit any of the defined types.",
        }
    }

    pub const fn verdict(self) -> &'static str {
        match self {
            Self::A => "Excellent practice for maximum control.",
            Self::B => "Bad practice: budget is hard to control between different strategies.",
            Self::C => "Worst practice: nearly impossible to optimize effectively.",
            Self::D => "Excellent practice, great for separating match types.",
            Self::E => "Okay, but can be improved by separating match types.",
            Self::F => "Good practice for targeting specific products or categories.",
            Self::G => "Good practice for grouping closely related keywords.",
            Self::H => "Okay, but should be cleaned up by separating match types.",
            Self::I => "Bad practice: keywords can't be relevant to all products.",
            Self::J => "Bad practice, combining multiple issues.",
            Self::Unknown => "Needs investigation, likely an unusual or new campaign setup.",
        }
    }

    pub const fn rating(self) -> StructureRating {
        match self {
            Self::A | Self::D | Self::F | Self::G => StructureRating::Good,
            Self::E | Self::H | Self::Unknown => StructureRating::Okay,
            Self::B | Self::C | Self::I | Self::J => StructureRating::Bad,
        }
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Maps a campaign's structural counts to its archetype.
///
/// Guards are evaluated strictly in order: single ad group before multiple, and within the
/// multi ad group branch the mixed keyword + target case before keyword-only or target-only.
/// A single ad group with one ad but no targets is `Unknown`, not `A`.
pub fn classify(counts: &StructureCounts) -> StructureType {
    let targeting = counts.targeting();

    if counts.ad_groups == 1 && counts.ads == 1 {
        return match targeting {
            0 => StructureType::Unknown,
            1 => StructureType::A,
            _ if counts.match_types <= 1 => StructureType::G,
            _ => StructureType::H,
        };
    }

    if counts.ad_groups == 1 && counts.ads > 1 {
        return if targeting == 1 {
            StructureType::I
        } else {
            StructureType::J
        };
    }

    if counts.ad_groups > 1 {
        if counts.asins != 1 {
            return StructureType::C;
        }
        if counts.keywords > 0 && counts.targets > 0 {
            return StructureType::B;
        }
        if counts.keywords > 0 {
            return if counts.match_types <= 1 {
                StructureType::D
            } else {
                StructureType::E
            };
        }
        if counts.targets > 0 {
            return StructureType::F;
        }
    }

    StructureType::Unknown
}

/// Account-level structure health.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysis {
    pub total_campaigns: usize,
    pub good_structure_percent: f64,
    pub bad_structure_percent: f64,
    pub type_distribution: BTreeMap<StructureType, usize>,
    pub per_campaign_type: BTreeMap<CampaignId, StructureType>,
}

pub fn analyze_structure(campaigns: &[CampaignAggregate]) -> StructureAnalysis {
    let total_campaigns = campaigns.len();
    if total_campaigns == 0 {
        return StructureAnalysis::default();
    }

    let mut type_distribution = BTreeMap::new();
    let mut per_campaign_type = BTreeMap::new();
    let mut good = 0usize;

    for campaign in campaigns {
        let structure_type = campaign.structure_type();
        *type_distribution.entry(structure_type).or_insert(0) += 1;
        per_campaign_type.insert(campaign.campaign_id().clone(), structure_type);
        if structure_type.is_good() {
            good += 1;
        }
    }

    let good_structure_percent = good as f64 / total_campaigns as f64 * 100.0;

    StructureAnalysis {
        total_campaigns,
        good_structure_percent,
        bad_structure_percent: 100.0 - good_structure_percent,
        type_distribution,
        per_campaign_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::campaign::aggregate_campaigns;
    use crate::audit::domain::{EntityType, LineItem, LineItemTable};

    fn counts(
        ad_groups: usize,
        ads: usize,
        asins: usize,
        keywords: usize,
        targets: usize,
        match_types: usize,
    ) -> StructureCounts {
        StructureCounts {
            ad_groups,
            ads,
            asins,
            keywords,
            targets,
            match_types,
        }
    }

    #[test]
    fn single_ad_group_single_ad_branches() {
        assert_eq!(classify(&counts(1, 1, 1, 1, 0, 1)), StructureType::A);
        assert_eq!(classify(&counts(1, 1, 1, 0, 1, 0)), StructureType::A);
        assert_eq!(classify(&counts(1, 1, 1, 3, 0, 1)), StructureType::G);
        assert_eq!(classify(&counts(1, 1, 1, 0, 4, 0)), StructureType::G);
        assert_eq!(classify(&counts(1, 1, 1, 2, 0, 2)), StructureType::H);
        assert_eq!(classify(&counts(1, 1, 1, 0, 0, 0)), StructureType::Unknown);
    }

    #[test]
    fn single_ad_group_multiple_ads_branches() {
        assert_eq!(classify(&counts(1, 3, 3, 1, 0, 1)), StructureType::I);
        assert_eq!(classify(&counts(1, 2, 2, 0, 1, 0)), StructureType::I);
        assert_eq!(classify(&counts(1, 2, 2, 5, 2, 3)), StructureType::J);
        assert_eq!(classify(&counts(1, 2, 1, 0, 0, 0)), StructureType::J);
    }

    #[test]
    fn multiple_ad_groups_branches() {
        assert_eq!(classify(&counts(3, 3, 1, 4, 2, 1)), StructureType::B);
        assert_eq!(classify(&counts(3, 3, 1, 4, 0, 1)), StructureType::D);
        assert_eq!(classify(&counts(3, 3, 1, 4, 0, 2)), StructureType::E);
        assert_eq!(classify(&counts(2, 2, 1, 0, 6, 0)), StructureType::F);
        assert_eq!(classify(&counts(2, 2, 1, 0, 0, 0)), StructureType::Unknown);
        assert_eq!(classify(&counts(2, 2, 2, 0, 0, 0)), StructureType::C);
        assert_eq!(classify(&counts(2, 2, 2, 1, 1, 1)), StructureType::C);
    }

    #[test]
    fn multiple_ad_groups_without_product_ads_is_kitchen_sink() {
        assert_eq!(classify(&counts(2, 0, 0, 3, 0, 1)), StructureType::C);
    }

    #[test]
    fn degenerate_shapes_are_unknown() {
        assert_eq!(classify(&counts(0, 0, 0, 0, 0, 0)), StructureType::Unknown);
        assert_eq!(classify(&counts(0, 1, 1, 1, 0, 1)), StructureType::Unknown);
        assert_eq!(classify(&counts(1, 0, 0, 2, 0, 1)), StructureType::Unknown);
    }

    #[test]
    fn classification_is_stable_across_calls() {
        let shape = counts(3, 3, 1, 4, 0, 2);
        let first = classify(&shape);
        for _ in 0..5 {
            assert_eq!(classify(&shape), first);
        }
    }

    #[test]
    fn match_types_are_counted_across_the_whole_campaign() {
        let mut rows = vec![LineItem::new("c-1", EntityType::Campaign)];
        for (ad_group, match_type) in [("ag-1", "exact"), ("ag-2", "exact"), ("ag-3", "phrase")] {
            rows.push(
                LineItem::new("c-1", EntityType::ProductAd)
                    .with_ad_group(ad_group)
                    .with_ad(format!("ad-{ad_group}"), "B0SAME"),
            );
            rows.push(
                LineItem::new("c-1", EntityType::Keyword)
                    .with_ad_group(ad_group)
                    .with_keyword(format!("kw {ad_group}"), match_type),
            );
        }

        let campaigns = aggregate_campaigns(&LineItemTable::new(rows));
        assert_eq!(campaigns[0].counts().match_types, 2);
        assert_eq!(campaigns[0].structure_type(), StructureType::E);
    }

    #[test]
    fn analysis_percentages_and_distribution() {
        let table = LineItemTable::new(vec![
            // A
            LineItem::new("c-a", EntityType::ProductAd)
                .with_ad_group("ag")
                .with_ad("ad", "B01"),
            LineItem::new("c-a", EntityType::Keyword)
                .with_ad_group("ag")
                .with_keyword("shoes", "exact"),
            // C
            LineItem::new("c-c", EntityType::ProductAd)
                .with_ad_group("ag-1")
                .with_ad("ad-1", "B01"),
            LineItem::new("c-c", EntityType::ProductAd)
                .with_ad_group("ag-2")
                .with_ad("ad-2", "B02"),
            // Unknown: no ad groups at all
            LineItem::new("c-u", EntityType::Campaign),
            LineItem::new("c-u2", EntityType::Campaign),
        ]);

        let analysis = analyze_structure(&aggregate_campaigns(&table));
        assert_eq!(analysis.total_campaigns, 4);
        assert_eq!(analysis.good_structure_percent, 25.0);
        assert_eq!(analysis.bad_structure_percent, 75.0);
        assert_eq!(analysis.type_distribution.get(&StructureType::A), Some(&1));
        assert_eq!(analysis.type_distribution.get(&StructureType::C), Some(&1));
        assert_eq!(
            analysis.type_distribution.get(&StructureType::Unknown),
            Some(&2)
        );
        assert_eq!(
            analysis.type_distribution.values().sum::<usize>(),
            analysis.total_campaigns
        );
        assert_eq!(
            analysis.per_campaign_type.get(&CampaignId::from("c-c")),
            Some(&StructureType::C)
        );
    }

    #[test]
    fn empty_input_yields_empty_analysis() {
        let analysis = analyze_structure(&[]);
        assert_eq!(analysis.total_campaigns, 0);
        assert_eq!(analysis.good_structure_percent, 0.0);
        assert_eq!(analysis.bad_structure_percent, 0.0);
        assert!(analysis.type_distribution.is_empty());
        assert!(analysis.per_campaign_type.is_empty());
    }

    #[test]
    fn summary_serializes_codes_as_map_keys() {
        let mut analysis = StructureAnalysis::default();
        analysis.type_distribution.insert(StructureType::Unknown, 2);
        analysis.type_distribution.insert(StructureType::A, 1);
        let json = serde_json::to_value(&analysis).expect("serializes");
        assert_eq!(json["typeDistribution"]["A"], 1);
        assert_eq!(json["typeDistribution"]["Unknown"], 2);
        assert!(json.get("goodStructurePercent").is_some());
    }
}
