//! Carrier signup: form validation and the submission boundary.
//!
//! The network client lives outside this crate. [`SignupService`] is the seam;
//! [`submit_signup`] validates, builds the wire payload and folds the
//! service's answer into a [`SignupOutcome`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

pub const TRUCK_TYPES: [&str; 6] = ["Dry Van", "Reefer", "Flatbed", "Box Truck", "Hotshot", "Power Only"];
pub const OPERATION_AREAS: [&str; 4] = ["Southeast", "Midwest", "Coastal", "Southwest"];
pub const COMMUNICATION_METHODS: [&str; 4] = ["Email", "Phone", "SMS", "WhatsApp"];
pub const TRUCK_COUNT_OPTIONS: [&str; 3] = ["0-7", "8-15", "20+"];

pub const MIN_PASSWORD_LEN: usize = 8;

const SUCCESS_MESSAGE: &str = "Your account has been created successfully!";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Form model
// ---------------------------------------------------------------------------

/// Who is signing up, with the fields specific to that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupKind {
    Company {
        company_name: String,
        company_email: String,
        company_contact_number: String,
    },
    OwnerOperator {
        owner_name: String,
        owner_email: String,
        owner_contact_number: String,
    },
}

/// The signup form as collected from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub kind: SignupKind,
    pub motor_carrier_no: String,
    pub authority_age: u32,
    pub number_of_trucks: String,
    pub truck_type: String,
    pub operation_area: String,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
    pub communication_method: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

/// Validation failures keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// First message in field order.
    pub fn first(&self) -> Option<&str> {
        self.0.values().flatten().next().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().flatten().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Check every rule and report all failures at once.
pub fn validate_signup(form: &SignupForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if form.password.is_empty() {
        errors.add("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 8 characters long");
    }
    if form.password != form.confirm_password {
        errors.add("confirm_password", "Passwords do not match");
    }
    if !form.agree_to_terms {
        errors.add("agree_to_terms", "You must agree to the terms and conditions");
    }

    let mut require = |field: &str, value: &str, message: &str| {
        if value.trim().is_empty() {
            errors.add(field, message);
            false
        } else {
            true
        }
    };

    let (email_field, email_value, email_label) = match &form.kind {
        SignupKind::Company {
            company_name,
            company_email,
            company_contact_number,
        } => {
            require("company_name", company_name, "Company name is required");
            require(
                "company_contact_number",
                company_contact_number,
                "Company contact number is required",
            );
            ("company_email", company_email, "company email")
        }
        SignupKind::OwnerOperator {
            owner_name,
            owner_email,
            owner_contact_number,
        } => {
            require("owner_name", owner_name, "Owner name is required");
            require(
                "owner_contact_number",
                owner_contact_number,
                "Owner contact number is required",
            );
            ("owner_email", owner_email, "owner email")
        }
    };

    let kind_email_present = require(email_field, email_value, &format!("{} is required", capitalize(email_label)));
    require("motor_carrier_no", &form.motor_carrier_no, "Motor Carrier Number is required");
    require("number_of_trucks", &form.number_of_trucks, "Number of trucks is required");
    require("truck_type", &form.truck_type, "Truck type is required");
    require("operation_area", &form.operation_area, "Operation area is required");
    require("first_name", &form.first_name, "Contact person first name is required");
    require("last_name", &form.last_name, "Contact person last name is required");
    require("contact_number", &form.contact_number, "Contact person number is required");
    require(
        "communication_method",
        &form.communication_method,
        "Communication method is required",
    );
    let email_present = require("email", &form.email, "Contact person email is required");

    if kind_email_present && !is_valid_email(email_value) {
        errors.add(email_field, format!("Please enter a valid {email_label} address"));
    }
    if email_present && !is_valid_email(&form.email) {
        errors.add("email", "Please enter a valid contact person email address");
    }
    if form.authority_age == 0 {
        errors.add("authority_age", "Authority age is required");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Wire payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signup_type", rename_all = "kebab-case")]
pub enum SignupRequestKind {
    Company {
        company_name: String,
        company_email: String,
        company_contact_number: String,
    },
    OwnerOperator {
        owner_name: String,
        owner_email: String,
        owner_contact_number: String,
    },
}

/// The snake_case payload the signup endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(flatten)]
    pub kind: SignupRequestKind,
    pub motor_carrier_no: String,
    pub authority_age: u32,
    pub number_of_trucks: String,
    pub truck_type: String,
    pub operation_area: String,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
    pub communication_method: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    /// Trim text fields and lowercase emails. The password is sent as typed.
    pub fn from_form(form: &SignupForm) -> Self {
        let email = |value: &str| value.trim().to_lowercase();
        let kind = match &form.kind {
            SignupKind::Company {
                company_name,
                company_email,
                company_contact_number,
            } => SignupRequestKind::Company {
                company_name: company_name.trim().to_owned(),
                company_email: email(company_email),
                company_contact_number: company_contact_number.trim().to_owned(),
            },
            SignupKind::OwnerOperator {
                owner_name,
                owner_email,
                owner_contact_number,
            } => SignupRequestKind::OwnerOperator {
                owner_name: owner_name.trim().to_owned(),
                owner_email: email(owner_email),
                owner_contact_number: owner_contact_number.trim().to_owned(),
            },
        };

        Self {
            kind,
            motor_carrier_no: form.motor_carrier_no.trim().to_owned(),
            authority_age: form.authority_age,
            number_of_trucks: form.number_of_trucks.clone(),
            truck_type: form.truck_type.clone(),
            operation_area: form.operation_area.clone(),
            first_name: form.first_name.trim().to_owned(),
            last_name: form.last_name.trim().to_owned(),
            contact_number: form.contact_number.trim().to_owned(),
            communication_method: form.communication_method.clone(),
            email: email(&form.email),
            password: form.password.clone(),
        }
    }
}

/// What the endpoint returns for a created account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub message: Option<String>,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Service boundary
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    /// The service refused the request, possibly with per-field errors.
    #[error("{message}")]
    Rejected {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },

    /// The service could not be reached or answered unintelligibly.
    #[error("signup service unavailable: {0}")]
    Unavailable(String),
}

/// The external submission service.
pub trait SignupService: Send + Sync {
    fn submit(
        &self,
        request: &SignupRequest,
    ) -> impl Future<Output = Result<SignupResponse, SignupError>> + Send;
}

/// Result surfaced to the page layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SignupResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Validate, submit, and report. Invalid forms never reach the service.
#[instrument(skip_all)]
pub async fn submit_signup<S: SignupService>(service: &S, form: &SignupForm) -> SignupOutcome {
    if let Err(errors) = validate_signup(form) {
        debug!(count = errors.len(), "signup form rejected locally");
        return SignupOutcome {
            success: false,
            message: errors.first().unwrap_or("Invalid signup form").to_owned(),
            data: None,
            errors: Some(errors.0),
        };
    }

    let request = SignupRequest::from_form(form);
    match service.submit(&request).await {
        Ok(response) => SignupOutcome {
            success: true,
            message: response
                .message
                .clone()
                .unwrap_or_else(|| SUCCESS_MESSAGE.to_owned()),
            data: Some(response),
            errors: None,
        },
        Err(SignupError::Rejected { message, errors }) => {
            warn!(%message, "signup rejected by service");
            SignupOutcome {
                success: false,
                message: if message.is_empty() {
                    "Registration failed".to_owned()
                } else {
                    message
                },
                data: None,
                errors: (!errors.is_empty()).then_some(errors),
            }
        }
        Err(err @ SignupError::Unavailable(_)) => {
            warn!(error = %err, "signup service failed");
            SignupOutcome {
                success: false,
                message: err.to_string(),
                data: None,
                errors: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn owner_form() -> SignupForm {
        SignupForm {
            kind: SignupKind::OwnerOperator {
                owner_name: "  Jane Driver ".into(),
                owner_email: " Jane@Example.COM ".into(),
                owner_contact_number: "555-0100".into(),
            },
            motor_carrier_no: " MC123456 ".into(),
            authority_age: 2,
            number_of_trucks: "0-7".into(),
            truck_type: "Reefer".into(),
            operation_area: "Midwest".into(),
            first_name: "Jane".into(),
            last_name: "Driver".into(),
            contact_number: "555-0100".into(),
            communication_method: "Email".into(),
            email: "JANE@example.com".into(),
            password: "hunter2hunter2".into(),
            confirm_password: "hunter2hunter2".into(),
            agree_to_terms: true,
        }
    }

    struct RecordingService {
        calls: AtomicUsize,
        answer: fn(&SignupRequest) -> Result<SignupResponse, SignupError>,
    }

    impl SignupService for RecordingService {
        async fn submit(&self, request: &SignupRequest) -> Result<SignupResponse, SignupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.answer)(request)
        }
    }

    fn created(request: &SignupRequest) -> Result<SignupResponse, SignupError> {
        Ok(SignupResponse {
            id: 7,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            message: None,
            created_at: "2026-01-01T00:00:00Z".into(),
        })
    }

    fn rejected(_: &SignupRequest) -> Result<SignupResponse, SignupError> {
        Err(SignupError::Rejected {
            message: "Email already registered".into(),
            errors: BTreeMap::from([("email".to_owned(), vec!["taken".to_owned()])]),
        })
    }

    fn unavailable(_: &SignupRequest) -> Result<SignupResponse, SignupError> {
        Err(SignupError::Unavailable("connection refused".into()))
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate_signup(&owner_form()).is_ok());
    }

    #[test]
    fn collects_every_failure() {
        let mut form = owner_form();
        form.password = "short".into();
        form.confirm_password = "different".into();
        form.agree_to_terms = false;
        form.authority_age = 0;
        form.email = "not-an-email".into();

        let errors = validate_signup(&form).unwrap_err();
        assert_eq!(errors.field("password"), ["Password must be at least 8 characters long"]);
        assert_eq!(errors.field("confirm_password"), ["Passwords do not match"]);
        assert!(!errors.field("agree_to_terms").is_empty());
        assert_eq!(errors.field("authority_age"), ["Authority age is required"]);
        assert_eq!(
            errors.field("email"),
            ["Please enter a valid contact person email address"]
        );
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn company_fields_are_required() {
        let mut form = owner_form();
        form.kind = SignupKind::Company {
            company_name: "   ".into(),
            company_email: "ops@fleet".into(),
            company_contact_number: "555-0199".into(),
        };

        let errors = validate_signup(&form).unwrap_err();
        assert_eq!(errors.field("company_name"), ["Company name is required"]);
        assert_eq!(
            errors.field("company_email"),
            ["Please enter a valid company email address"]
        );
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("  a@b.co "));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@c.d"));
    }

    #[test]
    fn request_trims_and_lowercases() {
        let request = SignupRequest::from_form(&owner_form());
        assert_eq!(request.email, "jane@example.com");
        assert_eq!(request.motor_carrier_no, "MC123456");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["signup_type"], "owner-operator");
        assert_eq!(json["owner_name"], "Jane Driver");
        assert_eq!(json["owner_email"], "jane@example.com");
        assert_eq!(json["authority_age"], 2);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_service() {
        let service = RecordingService {
            calls: AtomicUsize::new(0),
            answer: created,
        };
        let mut form = owner_form();
        form.agree_to_terms = false;

        let outcome = submit_signup(&service, &form).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "You must agree to the terms and conditions");
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_submission() {
        let service = RecordingService {
            calls: AtomicUsize::new(0),
            answer: created,
        };
        let outcome = submit_signup(&service, &owner_form()).await;
        assert!(outcome.success);
        assert_eq!(outcome.message, SUCCESS_MESSAGE);
        assert_eq!(outcome.data.unwrap().email, "jane@example.com");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn service_errors_become_failed_outcomes() {
        let service = RecordingService {
            calls: AtomicUsize::new(0),
            answer: rejected,
        };
        let outcome = submit_signup(&service, &owner_form()).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Email already registered");
        assert_eq!(outcome.errors.unwrap()["email"], vec!["taken"]);

        let service = RecordingService {
            calls: AtomicUsize::new(0),
            answer: unavailable,
        };
        let outcome = submit_signup(&service, &owner_form()).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "signup service unavailable: connection refused");
        assert!(outcome.errors.is_none());
    }
}
