//! Domain-level command types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed to the screen shell. View models map the DTOs from the `shared`
//! crate onto these internal types.

pub mod expenses {
    use chrono::{DateTime, Utc};
    use shared::AddExpenseRequest;

    use crate::domain::models::expense::iso_date;
    use crate::error::ValidationError;

    /// Raw input for creating a new expense, before validation.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        pub title: String,
        /// Amount exactly as typed, parsed during validation
        pub amount_input: String,
        /// Category label from the picker, validated against the closed set
        pub category: String,
        /// Uses the current time when absent
        pub date: Option<DateTime<Utc>>,
        pub image_uri: Option<String>,
    }

    impl TryFrom<AddExpenseRequest> for CreateExpenseCommand {
        type Error = ValidationError;

        fn try_from(request: AddExpenseRequest) -> Result<Self, Self::Error> {
            let date = match request.date {
                Some(raw) => {
                    Some(iso_date::parse(&raw).ok_or(ValidationError::InvalidDate(raw))?)
                }
                None => None,
            };

            Ok(Self {
                title: request.title,
                amount_input: request.amount,
                category: request.category,
                date,
                image_uri: request.image_uri,
            })
        }
    }

}
