//! Deterministic book generation from seed definitions.
//!
//! The same seed definition always produces an identical [`ExampleBook`]:
//! every random choice flows from one `ChaCha8Rng` seeded with the
//! definition's seed value, in a fixed order.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::{CityEntry, SeedDefinition, SeedRegistry};
use crate::seed::{
    ExampleBook, ExampleCustomerSeed, ExampleInvestmentSeed, ExampleNotificationSeed,
    FrequencySeed, GenderSeed, InvestmentKindSeed, InvestmentStatusSeed, NotificationKindSeed,
    SeedDate,
};
use crate::validation::{is_valid_person_name, sanitize_person_name};

/// Maximum number of attempts to generate a valid name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Every third investment is a SIP, starting with the first.
const KIND_CYCLE: [InvestmentKindSeed; 3] = [
    InvestmentKindSeed::Sip,
    InvestmentKindSeed::Lumpsum,
    InvestmentKindSeed::Lumpsum,
];

const FREQUENCIES: [FrequencySeed; 3] = [
    FrequencySeed::Monthly,
    FrequencySeed::Quarterly,
    FrequencySeed::Yearly,
];

const FALLBACK_CITY: &str = "Mumbai";
const FALLBACK_STATE: &str = "Maharashtra";
const FALLBACK_CODE: &str = "IND";

/// Title, body template, and severity for generated notifications.
///
/// `{name}` in the body is replaced with a generated customer's full name.
const NOTIFICATION_TEMPLATES: [(&str, &str, NotificationKindSeed); 6] = [
    (
        "New customer registered",
        "{name} completed onboarding and is awaiting KYC review.",
        NotificationKindSeed::Info,
    ),
    (
        "SIP instalment received",
        "The scheduled SIP instalment for {name} was processed.",
        NotificationKindSeed::Success,
    ),
    (
        "KYC documents pending",
        "{name} has not uploaded the remaining KYC documents.",
        NotificationKindSeed::Warning,
    ),
    (
        "Mandate registration failed",
        "The bank rejected the auto-debit mandate for {name}.",
        NotificationKindSeed::Error,
    ),
    (
        "Lumpsum order confirmed",
        "The lumpsum purchase order for {name} was confirmed.",
        NotificationKindSeed::Success,
    ),
    (
        "SIP nearing completion",
        "The SIP for {name} has two instalments remaining.",
        NotificationKindSeed::Info,
    ),
];

/// Generates an example book from a seed definition.
///
/// Generated records have:
///
/// - Names, emails, and mobiles that pass the customer form's rules
/// - Cities, occupations, and tax statuses drawn from the registry
/// - Investments owned by generated customers, every third one a SIP
/// - Notifications newest first, roughly half of them unread
///
/// # Errors
///
/// Returns [`GenerationError`] if name generation fails after the maximum
/// number of retries, or if investments are requested without customers.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_book};
///
/// let registry = SeedRegistry::builtin().expect("valid");
/// let seed_def = registry.find_seed("quiet-quokka").expect("found");
/// let book = generate_example_book(&registry, seed_def).expect("generated");
///
/// // Same seed produces an identical book
/// let again = generate_example_book(&registry, seed_def).expect("generated");
/// assert_eq!(book, again);
/// ```
pub fn generate_example_book(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<ExampleBook, GenerationError> {
    if seed_def.customer_count() == 0 && seed_def.investment_count() > 0 {
        return Err(GenerationError::NoCustomersForInvestments {
            investment_count: seed_def.investment_count(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());

    let customers = (1..=seed_def.customer_count())
        .map(|index| generate_customer(&mut rng, registry, index))
        .collect::<Result<Vec<_>, _>>()?;

    let investments = (1..=seed_def.investment_count())
        .zip(KIND_CYCLE.iter().cycle())
        .map(|(index, kind)| generate_investment(&mut rng, seed_def.customer_count(), index, *kind))
        .collect();

    let notifications = generate_notifications(&mut rng, &customers, seed_def.notification_count());

    Ok(ExampleBook {
        customers,
        investments,
        notifications,
    })
}

fn generate_customer(
    rng: &mut ChaCha8Rng,
    registry: &SeedRegistry,
    index: usize,
) -> Result<ExampleCustomerSeed, GenerationError> {
    let first_name = generate_name(rng, |r| FirstName(EN).fake_with_rng(r))?;
    let last_name = generate_name(rng, |r| LastName(EN).fake_with_rng(r))?;
    let email = email_for(&first_name, &last_name, index);
    let mobile = format!(
        "{}{:09}",
        rng.random_range(6_u32..=9),
        rng.random_range(0_u32..1_000_000_000)
    );
    let gender = match rng.random_range(0_u32..10) {
        0..=4 => GenderSeed::Male,
        5..=8 => GenderSeed::Female,
        _ => GenderSeed::Other,
    };
    let (city, state) = registry.cities().choose(rng).map_or_else(
        || (FALLBACK_CITY.to_owned(), FALLBACK_STATE.to_owned()),
        |CityEntry { city, state }| (city.clone(), state.clone()),
    );

    Ok(ExampleCustomerSeed {
        index,
        first_name,
        last_name,
        email,
        mobile,
        date_of_birth: random_date(rng, 1955..=2003),
        gender,
        tax_status: choose_code(rng, registry.tax_statuses()),
        occupation: choose_code(rng, registry.occupations()),
        city,
        state,
        active: rng.random_ratio(4, 5),
        kyc_verified: rng.random_ratio(3, 4),
        premium: rng.random_ratio(1, 5),
        registered_on: random_date(rng, 2022..=2024),
    })
}

/// Retries the faker until it yields a name the form would accept.
fn generate_name(
    rng: &mut ChaCha8Rng,
    mut fake_name: impl FnMut(&mut ChaCha8Rng) -> String,
) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let candidate = sanitize_person_name(&fake_name(rng));
        if is_valid_person_name(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Builds `first.last{index}@example.com` from the ASCII letters of each name.
fn email_for(first_name: &str, last_name: &str, index: usize) -> String {
    let local = |name: &str| -> String {
        let cleaned: String = name
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if cleaned.is_empty() {
            "customer".to_owned()
        } else {
            cleaned
        }
    };
    format!(
        "{}.{}{index}@example.com",
        local(first_name),
        local(last_name)
    )
}

fn choose_code(rng: &mut ChaCha8Rng, codes: &[String]) -> String {
    codes
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| FALLBACK_CODE.to_owned())
}

fn random_date(rng: &mut ChaCha8Rng, years: std::ops::RangeInclusive<i32>) -> SeedDate {
    SeedDate {
        year: rng.random_range(years),
        month: rng.random_range(1..=12),
        day: rng.random_range(1..=28),
    }
}

fn generate_investment(
    rng: &mut ChaCha8Rng,
    customer_count: usize,
    index: usize,
    kind: InvestmentKindSeed,
) -> ExampleInvestmentSeed {
    let customer_index = rng.random_range(1..=customer_count.max(1));
    let start_date = random_date(rng, 2021..=2024);
    let status = match rng.random_range(0_u32..100) {
        0..=59 => InvestmentStatusSeed::Active,
        60..=74 => InvestmentStatusSeed::Completed,
        75..=84 => InvestmentStatusSeed::Pending,
        85..=94 => InvestmentStatusSeed::Inactive,
        _ => InvestmentStatusSeed::Cancelled,
    };

    match kind {
        InvestmentKindSeed::Sip => {
            let duration_months = rng.random_range(12_u32..=120);
            ExampleInvestmentSeed {
                index,
                customer_index,
                kind,
                amount: u64::from(rng.random_range(1_u32..=50)).saturating_mul(500),
                start_date,
                end_date: Some(add_months(start_date, duration_months)),
                frequency: FREQUENCIES.choose(rng).copied(),
                duration_months: Some(duration_months),
                status,
            }
        }
        InvestmentKindSeed::Lumpsum => ExampleInvestmentSeed {
            index,
            customer_index,
            kind,
            amount: u64::from(rng.random_range(10_u32..=500)).saturating_mul(1_000),
            start_date,
            end_date: None,
            frequency: None,
            duration_months: None,
            status,
        },
    }
}

fn add_months(date: SeedDate, months: u32) -> SeedDate {
    let zero_based = i64::from(date.year)
        .saturating_mul(12)
        .saturating_add(i64::from(date.month).saturating_sub(1))
        .saturating_add(i64::from(months));
    SeedDate {
        year: i32::try_from(zero_based.div_euclid(12)).unwrap_or(i32::MAX),
        month: u32::try_from(zero_based.rem_euclid(12)).map_or(1, |m| m.saturating_add(1)),
        day: date.day,
    }
}

fn generate_notifications(
    rng: &mut ChaCha8Rng,
    customers: &[ExampleCustomerSeed],
    count: usize,
) -> Vec<ExampleNotificationSeed> {
    let mut minutes_ago = 0_u32;
    (1..=count)
        .map(|index| {
            minutes_ago = minutes_ago.saturating_add(rng.random_range(20..=240));
            let (title, template, kind) = NOTIFICATION_TEMPLATES.choose(rng).copied().unwrap_or((
                "Account update",
                "There is news about {name}.",
                NotificationKindSeed::Info,
            ));
            let name = customers.choose(rng).map_or_else(
                || "a customer".to_owned(),
                |c| format!("{} {}", c.first_name, c.last_name),
            );
            ExampleNotificationSeed {
                index,
                title: title.to_owned(),
                message: template.replace("{name}", &name),
                kind,
                read: rng.random_ratio(1, 2),
                minutes_ago,
            }
        })
        .collect()
}
