use campaign_roaster::audit::report::{OverallGrade, Pillar, VerdictLevel};
use campaign_roaster::audit::{
    AccountAudit, CampaignId, EntityType, LineItem, LineItemTable, StructureType,
};
use campaign_roaster::bulksheet::BulkSheetImporter;

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/sponsored_products_bulk.csv"
);

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn keyword(campaign: &str, ad_group: &str, text: &str, match_type: &str) -> LineItem {
    LineItem::new(campaign, EntityType::Keyword)
        .with_ad_group(ad_group)
        .with_keyword(text, match_type)
}

fn product_ad(campaign: &str, ad_group: &str, ad: &str, asin: &str) -> LineItem {
    LineItem::new(campaign, EntityType::ProductAd)
        .with_ad_group(ad_group)
        .with_ad(ad, asin)
}

fn type_of(audit: &AccountAudit, campaign: &str) -> StructureType {
    audit.structure().per_campaign_type[&CampaignId::from(campaign)]
}

#[test]
fn single_keyword_campaign_is_granular() {
    let audit = AccountAudit::run(&LineItemTable::new(vec![
        product_ad("a", "ag", "ad", "B01"),
        keyword("a", "ag", "socks", "exact"),
    ]));

    assert_eq!(type_of(&audit, "a"), StructureType::A);
    assert_eq!(audit.structure().good_structure_percent, 100.0);
}

#[test]
fn themed_and_messy_ad_groups_split_on_match_type() {
    let audit = AccountAudit::run(&LineItemTable::new(vec![
        product_ad("g", "ag-g", "ad-g", "B01"),
        keyword("g", "ag-g", "wool socks", "exact"),
        keyword("g", "ag-g", "hiking socks", "exact"),
        keyword("g", "ag-g", "warm socks", "exact"),
        product_ad("h", "ag-h", "ad-h", "B01"),
        keyword("h", "ag-h", "wool socks", "exact"),
        keyword("h", "ag-h", "hiking socks", "broad"),
    ]));

    assert_eq!(type_of(&audit, "g"), StructureType::G);
    assert_eq!(type_of(&audit, "h"), StructureType::H);
    assert_eq!(audit.structure().good_structure_percent, 50.0);
    // Okay-rated types are not good, so they count against the account.
    assert_eq!(audit.structure().bad_structure_percent, 50.0);
}

#[test]
fn match_types_are_counted_across_ad_groups() {
    let audit = AccountAudit::run(&LineItemTable::new(vec![
        product_ad("e", "ag-1", "ad-1", "B01"),
        product_ad("e", "ag-2", "ad-2", "B01"),
        product_ad("e", "ag-3", "ad-3", "B01"),
        keyword("e", "ag-1", "socks", "exact"),
        keyword("e", "ag-2", "socks", "exact"),
        keyword("e", "ag-3", "socks", "broad"),
    ]));

    assert_eq!(type_of(&audit, "e"), StructureType::E);
}

#[test]
fn multiple_asins_across_ad_groups_is_kitchen_sink() {
    let audit = AccountAudit::run(&LineItemTable::new(vec![
        product_ad("c", "ag-1", "ad-1", "B01"),
        product_ad("c", "ag-2", "ad-2", "B02"),
        keyword("c", "ag-1", "socks", "exact"),
        LineItem::new("c", EntityType::ProductTargeting)
            .with_ad_group("ag-2")
            .with_targeting_expression("asin=\"B09\""),
    ]));

    assert_eq!(type_of(&audit, "c"), StructureType::C);
    assert_eq!(audit.structure().bad_structure_percent, 100.0);
}

#[test]
fn empty_input_scores_only_the_automation_floor() {
    let audit = AccountAudit::run(&LineItemTable::default());

    assert_eq!(audit.structure().total_campaigns, 0);
    assert_eq!(audit.structure().good_structure_percent, 0.0);
    assert!(audit.structure().type_distribution.is_empty());
    assert_eq!(audit.overall_score(), 10);

    let verdicts = audit.verdicts();
    assert_eq!(verdicts.overall.grade, OverallGrade::NeedsOverhaul);
    // No spend at all is not flagged as under-automated.
    assert_eq!(
        verdicts
            .pillar(Pillar::Automation)
            .expect("automation verdict")
            .level,
        VerdictLevel::Success
    );
}

fn automation_account(auto_spend: f64) -> LineItemTable {
    LineItemTable::new(vec![
        LineItem::new("auto", EntityType::Campaign).with_spend(auto_spend),
        LineItem::new("auto", EntityType::ProductTargeting)
            .with_targeting_expression("close-match"),
        LineItem::new("manual", EntityType::Campaign).with_spend(100.0 - auto_spend),
        keyword("manual", "ag", "socks", "exact"),
    ])
}

#[test]
fn automation_share_is_banded() {
    let cases = [(20.0, 20.0), (35.0, 10.0), (60.0, 0.0), (5.0, 10.0)];

    for (auto_spend, points) in cases {
        let audit = AccountAudit::run(&automation_account(auto_spend));
        assert_close(audit.automation().auto_percent, auto_spend);
        assert_eq!(
            audit.score().automation,
            points,
            "auto share {auto_spend}% should earn {points} points"
        );
    }
}

#[test]
fn fixture_account_is_scored_end_to_end() {
    let table = BulkSheetImporter::from_path(FIXTURE).expect("fixture imports");
    let audit = AccountAudit::run(&table);

    let structure = audit.structure();
    assert_eq!(structure.total_campaigns, 7);
    assert_eq!(type_of(&audit, "1001"), StructureType::A);
    assert_eq!(type_of(&audit, "1002"), StructureType::G);
    assert_eq!(type_of(&audit, "1003"), StructureType::H);
    assert_eq!(type_of(&audit, "1004"), StructureType::G);
    assert_eq!(type_of(&audit, "1005"), StructureType::C);
    assert_eq!(type_of(&audit, "1006"), StructureType::E);
    assert_eq!(type_of(&audit, "1007"), StructureType::Unknown);
    assert_eq!(structure.type_distribution[&StructureType::G], 2);
    assert_close(structure.good_structure_percent, 300.0 / 7.0);
    assert_close(structure.bad_structure_percent, 400.0 / 7.0);
    assert_close(
        structure.good_structure_percent + structure.bad_structure_percent,
        100.0,
    );

    let automation = audit.automation();
    assert_close(automation.total_spend, 300.0);
    assert_close(automation.auto_spend, 60.0);
    assert_close(automation.auto_percent, 20.0);

    let funneling = audit.funneling();
    assert_eq!(funneling.total_campaigns, 7);
    assert_close(funneling.campaigns_with_negatives_percent, 300.0 / 7.0);
    assert_close(funneling.avg_negatives_per_campaign, 3.0 / 7.0);

    assert_close(audit.bid_adjustments().adjustment_usage_percent, 200.0 / 7.0);

    assert_eq!(audit.score().automation, 20.0);
    assert_eq!(audit.overall_score(), 52);

    let verdicts = audit.verdicts();
    assert_eq!(verdicts.overall.grade, OverallGrade::NeedsOverhaul);
    let level = |pillar| verdicts.pillar(pillar).expect("pillar verdict").level;
    assert_eq!(level(Pillar::Structure), VerdictLevel::Critical);
    assert_eq!(level(Pillar::Automation), VerdictLevel::Success);
    assert_eq!(level(Pillar::Funneling), VerdictLevel::Critical);
    assert_eq!(level(Pillar::BidAdjustments), VerdictLevel::Warning);
}

#[test]
fn fixture_breakdown_follows_campaign_rows() {
    let table = BulkSheetImporter::from_path(FIXTURE).expect("fixture imports");
    let breakdown = AccountAudit::run(&table).breakdown();

    let ids: Vec<&str> = breakdown.iter().map(|row| row.campaign_id.as_str()).collect();
    assert_eq!(ids, vec!["1001", "1002", "1003", "1004", "1005", "1006"]);

    let exact = &breakdown[0];
    assert_eq!(exact.campaign_name.as_deref(), Some("Socks - Exact"));
    assert_eq!(exact.structure_type, StructureType::A);
    assert_close(exact.acos, 0.25);
    assert_close(exact.roas, 4.0);
    assert_close(exact.orders, 20.0);

    let messy = &breakdown[2];
    assert_eq!(messy.structure_type, StructureType::H);
    assert_eq!(messy.acos, 0.0);
    assert_eq!(messy.roas, 0.0);
}
