use std::collections::BTreeMap;

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Observed attributes of one exported ad.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdProperties {
    pub landing_page: String,
    pub cta: String,
}

impl AdProperties {
    pub fn new(landing_page: impl Into<String>, cta: impl Into<String>) -> Self {
        Self {
            landing_page: landing_page.into(),
            cta: cta.into(),
        }
    }
}

/// Ads keyed by ad name.
pub type AdMap = IndexMap<String, AdProperties>;

/// Ad sets keyed by ad-set name.
pub type AdSetMap = IndexMap<String, AdMap>;

/// Keyed tree `campaign -> ad set -> ad -> properties`.
///
/// Keys are compared as exact strings and kept in first-insertion order.
/// Inserting an existing `(campaign, ad set, ad)` triple replaces the stored
/// properties as a whole without moving the ad.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CampaignHierarchy {
    campaigns: IndexMap<String, AdSetMap>,
}

impl CampaignHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `properties` at the given path, creating missing levels.
    ///
    /// Returns the properties previously stored at the same path, if any.
    pub fn insert(
        &mut self,
        campaign: impl Into<String>,
        ad_set: impl Into<String>,
        ad: impl Into<String>,
        properties: AdProperties,
    ) -> Option<AdProperties> {
        let ads = self
            .campaigns
            .entry(campaign.into())
            .or_default()
            .entry(ad_set.into())
            .or_default();
        match ads.entry(ad.into()) {
            Entry::Occupied(mut slot) => Some(slot.insert(properties)),
            Entry::Vacant(slot) => {
                slot.insert(properties);
                None
            }
        }
    }

    pub fn get(&self, campaign: &str, ad_set: &str, ad: &str) -> Option<&AdProperties> {
        self.campaigns.get(campaign)?.get(ad_set)?.get(ad)
    }

    pub fn campaigns(&self) -> &IndexMap<String, AdSetMap> {
        &self.campaigns
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn ad_count(&self) -> usize {
        self.campaigns
            .values()
            .flat_map(|ad_sets| ad_sets.values())
            .map(|ads| ads.len())
            .sum()
    }

    /// Iterates every `(campaign, ad set, ad, properties)` in insertion order.
    pub fn iter_ads(&self) -> impl Iterator<Item = (&str, &str, &str, &AdProperties)> {
        self.campaigns.iter().flat_map(|(campaign, ad_sets)| {
            ad_sets.iter().flat_map(move |(ad_set, ads)| {
                ads.iter().map(move |(ad, properties)| {
                    (campaign.as_str(), ad_set.as_str(), ad.as_str(), properties)
                })
            })
        })
    }
}

/// Expected placements: campaign name mapped to its legal ad-set names.
pub type CampaignPlacements = IndexMap<String, IndexSet<String>>;

/// Canonical target every ad is compared against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpectedValues {
    pub ad_name: String,
    pub landing_page: String,
    pub cta: String,
    /// Carried through configuration; no check consumes it.
    pub cgens: BTreeMap<String, i64>,
    pub campaigns: CampaignPlacements,
}

/// Per-ad check toggles. Every toggle defaults to enabled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Checks {
    pub cta: bool,
    pub ad_name: bool,
    /// Accepted for compatibility; gates no check yet.
    pub cgen: bool,
    pub landing_page: bool,
}

impl Default for Checks {
    fn default() -> Self {
        Self {
            cta: true,
            ad_name: true,
            cgen: true,
            landing_page: true,
        }
    }
}

/// Full QA configuration as accepted from a config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub expected_values: ExpectedValues,
    #[serde(default)]
    pub checks: Option<Checks>,
    pub ad_search_key: String,
}

impl Config {
    pub fn effective_checks(&self) -> Checks {
        self.checks.unwrap_or_default()
    }
}
