use crate::domain::ad::CampaignPlacements;

use super::placement_path;

/// `(campaign, ad set)` pairs that held at least one ad, same shape as the
/// expected placements.
pub type ObservedPlacements = CampaignPlacements;

/// Returns whether `ad_set` is a legal placement under `campaign`.
pub fn is_expected_path(expected: &CampaignPlacements, campaign: &str, ad_set: &str) -> bool {
    expected
        .get(campaign)
        .is_some_and(|ad_sets| ad_sets.contains(ad_set))
}

/// Lists `campaign > ad set` paths that are expected but were never observed,
/// campaign-major in configuration order.
pub fn compute_differences(
    expected: &CampaignPlacements,
    observed: &ObservedPlacements,
) -> Vec<String> {
    expected
        .iter()
        .flat_map(|(campaign, ad_sets)| {
            ad_sets
                .iter()
                .filter(move |ad_set| !is_expected_path(observed, campaign, ad_set))
                .map(move |ad_set| placement_path(campaign, ad_set))
        })
        .collect()
}
