//! Conversion from generated example data into domain records.

use chrono::{DateTime, Duration as TimeDelta, NaiveDate, NaiveTime, Utc};
use example_data::{
    ExampleBook, ExampleCustomerSeed, ExampleInvestmentSeed, ExampleNotificationSeed,
    FrequencySeed, GenderSeed, InvestmentKindSeed, InvestmentStatusSeed, NotificationKindSeed,
    SeedDate,
};

use crate::domain::{
    Customer, CustomerStatus, Error, Frequency, Gender, Investment, InvestmentStatus,
    InvestmentType, Notification, NotificationKind,
};

/// Seeded records ready to load into a ledger.
#[derive(Debug, Clone, Default)]
pub struct SeededRecords {
    pub customers: Vec<Customer>,
    pub investments: Vec<Investment>,
    pub notifications: Vec<Notification>,
}

/// `_id` of the customer with one-based sequence number `n`.
pub fn customer_id(n: u64) -> String {
    format!("cust-{n}")
}

/// Human code of the customer with one-based sequence number `n`.
pub fn customer_code(n: u64) -> String {
    format!("CUS{}", 10_000_u64.saturating_add(n))
}

/// `_id` of the investment with one-based sequence number `n`.
pub fn investment_id(n: u64) -> String {
    format!("inv-{n}")
}

/// Human code of the investment with one-based sequence number `n`.
pub fn investment_code(n: u64) -> String {
    format!("INV{}", 20_000_u64.saturating_add(n))
}

/// `id` of the notification with one-based sequence number `n`.
pub fn notification_id(n: u64) -> String {
    format!("ntf-{n}")
}

fn date(seed: SeedDate) -> Result<NaiveDate, Error> {
    NaiveDate::from_ymd_opt(seed.year, seed.month, seed.day).ok_or_else(|| {
        Error::internal(format!(
            "generated date {}-{}-{} is out of range",
            seed.year, seed.month, seed.day
        ))
    })
}

fn timestamp(seed: SeedDate) -> Result<DateTime<Utc>, Error> {
    let opening = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN);
    Ok(date(seed)?.and_time(opening).and_utc())
}

fn sequence(index: usize) -> u64 {
    u64::try_from(index).unwrap_or(u64::MAX)
}

const fn gender(seed: GenderSeed) -> Gender {
    match seed {
        GenderSeed::Male => Gender::Male,
        GenderSeed::Female => Gender::Female,
        GenderSeed::Other => Gender::Other,
    }
}

fn customer(seed: &ExampleCustomerSeed) -> Result<Customer, Error> {
    let n = sequence(seed.index);
    let created_at = timestamp(seed.registered_on)?;
    let initial = seed.last_name.chars().next().unwrap_or('X').to_ascii_uppercase();
    Ok(Customer {
        id: customer_id(n),
        customer_code: customer_code(n),
        first_name: seed.first_name.clone(),
        last_name: seed.last_name.clone(),
        email: seed.email.clone(),
        mobile: seed.mobile.clone(),
        date_of_birth: Some(date(seed.date_of_birth)?),
        gender: Some(gender(seed.gender)),
        tax_status: Some(seed.tax_status.clone()),
        occupation: Some(seed.occupation.clone()),
        city: Some(seed.city.clone()),
        state: Some(seed.state.clone()),
        status: if seed.active {
            CustomerStatus::Active
        } else {
            CustomerStatus::Inactive
        },
        kyc_status: Some(if seed.kyc_verified { "verified" } else { "pending" }.to_owned()),
        account_type: Some(if seed.premium { "Premium" } else { "Regular" }.to_owned()),
        pan_number: Some(format!("ABCP{initial}{:04}F", 1_000_u64.saturating_add(n))),
        sip_investments: 0,
        lumpsum_investments: 0,
        total_investment: 0,
        created_at,
        updated_at: created_at,
    })
}

fn investment(seed: &ExampleInvestmentSeed) -> Result<Investment, Error> {
    let n = sequence(seed.index);
    let created_at = timestamp(seed.start_date)?;
    Ok(Investment {
        id: investment_id(n),
        investment_id: investment_code(n),
        customer_id: customer_id(sequence(seed.customer_index)),
        investment_type: match seed.kind {
            InvestmentKindSeed::Sip => InvestmentType::Sip,
            InvestmentKindSeed::Lumpsum => InvestmentType::Lumpsum,
        },
        amount: seed.amount,
        start_date: date(seed.start_date)?,
        end_date: seed.end_date.map(date).transpose()?,
        frequency: seed.frequency.map(|f| match f {
            FrequencySeed::Monthly => Frequency::Monthly,
            FrequencySeed::Quarterly => Frequency::Quarterly,
            FrequencySeed::Yearly => Frequency::Yearly,
        }),
        duration: seed.duration_months,
        status: match seed.status {
            InvestmentStatusSeed::Active => InvestmentStatus::Active,
            InvestmentStatusSeed::Inactive => InvestmentStatus::Inactive,
            InvestmentStatusSeed::Pending => InvestmentStatus::Pending,
            InvestmentStatusSeed::Completed => InvestmentStatus::Completed,
            InvestmentStatusSeed::Cancelled => InvestmentStatus::Cancelled,
        },
        created_at,
        updated_at: created_at,
    })
}

fn notification(seed: &ExampleNotificationSeed, now: DateTime<Utc>) -> Notification {
    Notification {
        id: notification_id(sequence(seed.index)),
        title: seed.title.clone(),
        message: seed.message.clone(),
        kind: match seed.kind {
            NotificationKindSeed::Info => NotificationKind::Info,
            NotificationKindSeed::Success => NotificationKind::Success,
            NotificationKindSeed::Warning => NotificationKind::Warning,
            NotificationKindSeed::Error => NotificationKind::Error,
        },
        read: seed.read,
        created_at: now - TimeDelta::minutes(i64::from(seed.minutes_ago)),
    }
}

/// Convert a generated book, stamping notifications relative to `now`.
///
/// # Errors
/// Returns an internal [`Error`] if a generated date is out of range.
pub fn records_from_book(book: &ExampleBook, now: DateTime<Utc>) -> Result<SeededRecords, Error> {
    Ok(SeededRecords {
        customers: book.customers.iter().map(customer).collect::<Result<_, _>>()?,
        investments: book.investments.iter().map(investment).collect::<Result<_, _>>()?,
        notifications: book
            .notifications
            .iter()
            .map(|seed| notification(seed, now))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for seed conversion.
    use super::*;
    use example_data::{SeedRegistry, generate_example_book};

    #[test]
    fn converts_the_default_book() {
        let registry = SeedRegistry::builtin().expect("registry");
        let seed = registry.find_seed("ledger-lark").expect("seed");
        let book = generate_example_book(&registry, seed).expect("book");
        let records = records_from_book(&book, DateTime::<Utc>::UNIX_EPOCH).expect("records");

        assert_eq!(records.customers.len(), 50);
        assert_eq!(records.investments.len(), 100);
        assert_eq!(records.customers.first().map(|c| c.id.as_str()), Some("cust-1"));
        assert_eq!(
            records.customers.first().map(|c| c.customer_code.as_str()),
            Some("CUS10001")
        );
        assert!(
            records
                .investments
                .iter()
                .all(|inv| records.customers.iter().any(|c| c.id == inv.customer_id))
        );
    }

    #[test]
    fn codes_follow_the_numbering_scheme() {
        assert_eq!(customer_code(7), "CUS10007");
        assert_eq!(investment_code(7), "INV20007");
        assert_eq!(investment_id(7), "inv-7");
    }
}
