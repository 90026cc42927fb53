//! Static dropdown catalogue.
//!
//! Occupation and tax-status codes match the codes the example-data
//! registry assigns to seeded customers.

use async_trait::async_trait;

use super::Latency;
use crate::domain::ports::DropdownRepository;
use crate::domain::{DropdownCatalogue, DropdownKind, DropdownOption, Error};

fn options(pairs: &[(&str, &str)]) -> Vec<DropdownOption> {
    pairs
        .iter()
        .zip(1_u32..)
        .map(|((code, name), id)| DropdownOption::new(id.to_string(), *code, *name))
        .collect()
}

/// Built-in option lists for `kind`.
pub fn builtin_options(kind: DropdownKind) -> Vec<DropdownOption> {
    match kind {
        DropdownKind::Occupation => options(&[
            ("BUS", "Business"),
            ("SERV", "Service"),
            ("PROF", "Professional"),
            ("RET", "Retired"),
            ("HW", "Housewife"),
            ("STU", "Student"),
        ]),
        DropdownKind::TaxStatus => options(&[
            ("IND", "Resident Individual"),
            ("NRI", "Non-Resident Indian"),
            ("HUF", "Hindu Undivided Family"),
        ]),
        DropdownKind::HoldingNature => options(&[
            ("single", "Single Holding"),
            ("joint", "Joint Holding"),
            ("guardian", "On Behalf Of Minor"),
        ]),
        DropdownKind::PanExemptCategory => {
            options(&[("not_exempt", "Not Exempt"), ("exempt", "Exempt")])
        }
        DropdownKind::DividendPayMode => {
            options(&[("payout", "Payout"), ("reinvest", "Reinvestment")])
        }
        DropdownKind::AccountType => options(&[("savings", "Savings"), ("current", "Current")]),
        DropdownKind::State => options(&[
            ("KA", "Karnataka"),
            ("MH", "Maharashtra"),
            ("TN", "Tamil Nadu"),
            ("UP", "Uttar Pradesh"),
            ("DL", "Delhi"),
            ("GJ", "Gujarat"),
            ("WB", "West Bengal"),
            ("TS", "Telangana"),
            ("RJ", "Rajasthan"),
            ("KL", "Kerala"),
        ]),
        DropdownKind::Country => options(&[
            ("IN", "India"),
            ("US", "United States"),
            ("UK", "United Kingdom"),
            ("SG", "Singapore"),
            ("AU", "Australia"),
        ]),
        DropdownKind::CommunicationMode => options(&[
            ("physical", "Physical"),
            ("email", "Email"),
            ("mobile", "Mobile"),
            ("whatsapp", "WhatsApp"),
            ("email_physical", "Both Email and Physical"),
        ]),
    }
}

/// Dropdown repository serving the built-in lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDropdowns {
    latency: Latency,
}

impl StaticDropdowns {
    /// Catalogue that waits `latency` before each call.
    pub const fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl DropdownRepository for StaticDropdowns {
    async fn options(&self, kind: DropdownKind) -> Result<Vec<DropdownOption>, Error> {
        self.latency.wait().await;
        Ok(builtin_options(kind))
    }

    async fn catalogue(&self) -> Result<DropdownCatalogue, Error> {
        self.latency.wait().await;
        Ok(DropdownKind::ALL
            .into_iter()
            .map(|kind| (kind, builtin_options(kind)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the static catalogue.
    use super::*;

    #[tokio::test]
    async fn catalogue_covers_every_kind() {
        let catalogue = StaticDropdowns::default().catalogue().await.expect("catalogue");
        assert_eq!(catalogue.len(), DropdownKind::ALL.len());
        assert!(catalogue.values().all(|options| !options.is_empty()));
    }

    #[test]
    fn option_ids_are_one_based_per_kind() {
        let ids: Vec<_> = builtin_options(DropdownKind::AccountType)
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
