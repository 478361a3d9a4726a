//! Editable site copy, stored as one record at `site:content`.

use ledger_store::{Entity, RecordKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub hero: HeroSection,
    pub about: AboutSection,
    pub contact: ContactDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HeroSection {
    pub tagline: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AboutSection {
    pub skills: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactDetails {
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl SiteContent {
    pub const KEY_SUFFIX: &'static str = "content";
}

impl Entity for SiteContent {
    const KIND: RecordKind = RecordKind::Content;

    fn key_suffix(&self) -> String {
        Self::KEY_SUFFIX.to_string()
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            hero: HeroSection {
                tagline: "Visuals that speak. Brands that breathe.".to_string(),
                subtitle: "Creating exceptional design experiences for Ghanaian businesses"
                    .to_string(),
            },
            about: AboutSection {
                skills: "Graphic Designer | Photographer | Branding Expert | Lens Creator | \
                         Media Marketer | Creative Artist"
                    .to_string(),
                description: "Welcome to SKYDESIGNERS Limited...".to_string(),
            },
            contact: ContactDetails {
                phone: "+233 502 140 791".to_string(),
                email: "info@skydesigners.com".to_string(),
                address: "Accra, Ghana".to_string(),
            },
        }
    }
}
