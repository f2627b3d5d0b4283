//! Form state behind the add-expense screen.
use chrono::{DateTime, Utc};
use shared::{AddExpenseRequest, AddExpenseResponse, Notice, NoticeKind};
use tracing::{error, warn};

use crate::domain::commands::expenses::CreateExpenseCommand;
use crate::domain::expense_service::ExpenseService;
use crate::domain::models::expense::iso_date;
use crate::domain::models::Category;
use crate::error::ExpenseError;

pub const SAVED_MESSAGE: &str = "Expense saved!";

pub struct AddExpenseForm {
    service: ExpenseService,
    pub title: String,
    /// Amount exactly as typed
    pub amount_input: String,
    /// Category label from the picker
    pub category: String,
    pub date: DateTime<Utc>,
    pub image_uri: Option<String>,
}

impl AddExpenseForm {
    pub fn new(service: ExpenseService) -> Self {
        Self {
            service,
            title: String::new(),
            amount_input: String::new(),
            category: Category::Food.to_string(),
            date: iso_date::to_stored_precision(Utc::now()),
            image_uri: None,
        }
    }

    /// Record the reference returned by the photo picker or camera.
    /// The image itself is never read or copied.
    pub fn attach_receipt(&mut self, uri: impl Into<String>) {
        self.image_uri = Some(uri.into());
    }

    pub fn remove_receipt(&mut self) {
        self.image_uri = None;
    }

    pub fn to_request(&self) -> AddExpenseRequest {
        AddExpenseRequest {
            title: self.title.clone(),
            amount: self.amount_input.clone(),
            category: self.category.clone(),
            date: Some(self.date.to_rfc3339()),
            image_uri: self.image_uri.clone(),
        }
    }

    /// Save the expense.
    ///
    /// On success title, amount and receipt are cleared while category and
    /// date are kept for the next entry. On failure the form is untouched.
    pub async fn submit(&mut self) -> AddExpenseResponse {
        let command = CreateExpenseCommand {
            title: self.title.clone(),
            amount_input: self.amount_input.clone(),
            category: self.category.clone(),
            date: Some(self.date),
            image_uri: self.image_uri.clone(),
        };

        match self.service.create_expense(command).await {
            Ok(record) => {
                self.title.clear();
                self.amount_input.clear();
                self.image_uri = None;
                AddExpenseResponse {
                    notice: Notice::new(NoticeKind::Success, SAVED_MESSAGE),
                    expense_id: Some(record.id),
                }
            }
            Err(e) => {
                if e.is_validation() {
                    warn!("Add expense rejected: {}", e);
                } else {
                    error!("Add expense failed: {}", e);
                }
                AddExpenseResponse {
                    notice: notice_for_error(&e),
                    expense_id: None,
                }
            }
        }
    }
}

/// Map a failure onto the alert shown to the user.
pub fn notice_for_error(error: &ExpenseError) -> Notice {
    let kind = if error.is_validation() {
        NoticeKind::ValidationError
    } else {
        NoticeKind::Error
    };
    Notice::new(kind, error.user_message())
}

/// Handle a request coming straight from the screen shell.
pub async fn handle_add_expense(
    service: &ExpenseService,
    request: AddExpenseRequest,
) -> AddExpenseResponse {
    let result = match CreateExpenseCommand::try_from(request) {
        Ok(command) => service.create_expense(command).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(record) => AddExpenseResponse {
            notice: Notice::new(NoticeKind::Success, SAVED_MESSAGE),
            expense_id: Some(record.id),
        },
        Err(e) => AddExpenseResponse {
            notice: notice_for_error(&e),
            expense_id: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DbConnection, ExpenseRepository, DEFAULT_STORAGE_KEY};
    use crate::test_utils::{ReadOnlyStorage, TestEnvironment};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_successful_submit_resets_form() {
        let env = TestEnvironment::new().unwrap();
        let service = env.file_service();
        let mut form = AddExpenseForm::new(service.clone());
        form.title = "Market shopping".to_string();
        form.amount_input = "1500".to_string();
        form.category = "Shopping".to_string();
        form.attach_receipt("content://media/photos/17");

        let response = form.submit().await;

        assert_eq!(response.notice.kind, NoticeKind::Success);
        assert_eq!(response.notice.message, SAVED_MESSAGE);
        assert!(form.title.is_empty());
        assert!(form.amount_input.is_empty());
        assert!(form.image_uri.is_none());
        assert_eq!(form.category, "Shopping");

        let stored = service.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(Some(stored[0].id.clone()), response.expense_id);
        assert_eq!(stored[0].image_uri.as_deref(), Some("content://media/photos/17"));
    }

    #[tokio::test]
    async fn test_invalid_submit_keeps_input() {
        let env = TestEnvironment::new().unwrap();
        let mut form = AddExpenseForm::new(env.file_service());
        form.title = "Lunch".to_string();
        form.amount_input = "abc".to_string();

        let response = form.submit().await;

        assert_eq!(response.notice.kind, NoticeKind::ValidationError);
        assert_eq!(response.notice.title, "Validation Error");
        assert_eq!(
            response.notice.message,
            "Please enter valid title and numeric amount."
        );
        assert_eq!(response.expense_id, None);
        assert_eq!(form.amount_input, "abc");
    }

    #[tokio::test]
    async fn test_storage_failure_shows_generic_notice() {
        let db = DbConnection::init_in_memory().await.unwrap();
        let storage = Arc::new(ReadOnlyStorage { inner: db });
        let service = ExpenseService::new(ExpenseRepository::new(storage, DEFAULT_STORAGE_KEY), "Rs.");
        let mut form = AddExpenseForm::new(service.clone());
        form.title = "Lunch".to_string();
        form.amount_input = "500".to_string();

        let response = form.submit().await;

        assert_eq!(response.notice.kind, NoticeKind::Error);
        assert_eq!(response.notice.message, "Failed to save expense.");
        assert_eq!(form.title, "Lunch");
        assert!(service.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handle_request_from_shell() {
        let env = TestEnvironment::new().unwrap();
        let service = env.file_service();

        let response = handle_add_expense(
            &service,
            AddExpenseRequest {
                title: "Taxi".to_string(),
                amount: "300".to_string(),
                category: "Travel".to_string(),
                date: Some("2024-01-06".to_string()),
                image_uri: None,
            },
        )
        .await;
        assert_eq!(response.notice.kind, NoticeKind::Success);

        let bad_date = handle_add_expense(
            &service,
            AddExpenseRequest {
                title: "Taxi".to_string(),
                amount: "300".to_string(),
                category: "Travel".to_string(),
                date: Some("not a date".to_string()),
                image_uri: None,
            },
        )
        .await;
        assert_eq!(bad_date.notice.kind, NoticeKind::ValidationError);
        assert_eq!(service.load().await.unwrap().len(), 1);
    }

    #[test]
    fn test_form_round_trips_through_request() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let env = TestEnvironment::new().unwrap();
        let mut form = AddExpenseForm::new(env.file_service());
        form.title = "Coffee".to_string();
        form.amount_input = "120".to_string();

        let command = CreateExpenseCommand::try_from(form.to_request()).unwrap();
        let date = command.date;
        let record = rt.block_on(env.file_service().create_expense(command)).unwrap();
        assert_eq!(Some(record.date), date);
        assert_eq!(record.category, Category::Food);
        form.remove_receipt();
        assert!(form.image_uri.is_none());
    }

    #[tokio::test]
    async fn test_default_date_survives_storage() {
        let env = TestEnvironment::new().unwrap();
        let service = env.file_service();
        let mut form = AddExpenseForm::new(service.clone());
        let picked = form.date;
        form.title = "Coffee".to_string();
        form.amount_input = "120".to_string();

        form.submit().await;

        let stored = service.load().await.unwrap();
        assert_eq!(stored[0].date, picked);
        assert_eq!(form.date, picked);
    }
}
