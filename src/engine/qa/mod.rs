pub mod placement;

use tracing::info;

use crate::domain::ad::{AdProperties, CampaignHierarchy, Checks, ExpectedValues};
use crate::domain::report::{
    FailureMap, INCORRECT_AD_NAME, INCORRECT_CTA, INCORRECT_LANDING_PAGE, MISSING_PLACEMENT,
    QaReport, UNEXPECTED_PLACEMENT,
};

pub use placement::{ObservedPlacements, compute_differences, is_expected_path};

/// Separator between path components in failure keys.
pub const PATH_SEPARATOR: &str = " > ";

/// Walks every ad in `hierarchy`, applies the enabled checks, then reports
/// expected placements that no ad occupied.
///
/// Placement checks run regardless of `checks`.
pub fn run(hierarchy: &CampaignHierarchy, expected: &ExpectedValues, checks: &Checks) -> QaReport {
    let mut failures = FailureMap::new();
    let mut observed = ObservedPlacements::new();

    for (campaign, ad_set, ad, properties) in hierarchy.iter_ads() {
        let reasons = check_ad(campaign, ad_set, ad, properties, expected, checks);
        if !reasons.is_empty() {
            failures
                .entry(ad_path(campaign, ad_set, ad))
                .or_default()
                .extend(reasons.into_iter().map(ToOwned::to_owned));
        }
        observed
            .entry(campaign.to_string())
            .or_default()
            .insert(ad_set.to_string());
    }

    for path in compute_differences(&expected.campaigns, &observed) {
        failures
            .entry(path)
            .or_default()
            .push(MISSING_PLACEMENT.to_string());
    }

    let report = QaReport::from_failures(failures);
    info!(
        ads = hierarchy.ad_count(),
        success = report.success,
        failures = report.failure_count(),
        "qa_complete"
    );
    report
}

/// Reasons one ad fails, in check order.
fn check_ad(
    campaign: &str,
    ad_set: &str,
    ad: &str,
    properties: &AdProperties,
    expected: &ExpectedValues,
    checks: &Checks,
) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    if checks.cta && properties.cta != expected.cta {
        reasons.push(INCORRECT_CTA);
    }
    if checks.ad_name && ad != expected.ad_name {
        reasons.push(INCORRECT_AD_NAME);
    }
    if checks.landing_page && strip_query(&properties.landing_page) != expected.landing_page {
        reasons.push(INCORRECT_LANDING_PAGE);
    }
    if !is_expected_path(&expected.campaigns, campaign, ad_set) {
        reasons.push(UNEXPECTED_PLACEMENT);
    }
    reasons
}

/// Drops everything from the first `?` on.
pub fn strip_query(landing_page: &str) -> &str {
    landing_page
        .split_once('?')
        .map_or(landing_page, |(page, _)| page)
}

pub fn ad_path(campaign: &str, ad_set: &str, ad: &str) -> String {
    [campaign, ad_set, ad].join(PATH_SEPARATOR)
}

pub fn placement_path(campaign: &str, ad_set: &str) -> String {
    [campaign, ad_set].join(PATH_SEPARATOR)
}
