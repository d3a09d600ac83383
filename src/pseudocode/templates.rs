//! Static function templates, one descriptor per module tag.
//!
//! Text fields may contain placeholders filled per entity:
//!
//! | Placeholder | `LineItem` becomes |
//! |-------------|--------------------|
//! | `{entity}` | `line_item` |
//! | `{entities}` | `line_items` |
//! | `{Entity}` | `LineItem` |
//! | `{user_table}` | table of the account entity, `users` when none |

use crate::model::{ErrorBranch, ModuleTag, PersistOp};

use ErrorBranch::*;
use PersistOp::*;

/// One body step with placeholder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSpec {
    Validate(&'static str, &'static str),
    Branch(&'static str, ErrorBranch),
    Compute(&'static str),
    Persist(PersistOp, &'static str),
    Call(&'static str, &'static str),
    Return(&'static str),
}

/// A function skeleton with placeholder text.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [(&'static str, &'static str)],
    pub steps: &'static [StepSpec],
}

/// Functions a module contributes.
#[derive(Debug, Clone, Copy)]
pub struct ModuleTemplate {
    /// Emitted once.
    pub fixed: &'static [FunctionSpec],
    /// Emitted once per detected entity.
    pub per_entity: &'static [FunctionSpec],
    /// Emitted instead of `per_entity` when no entity was detected.
    pub without_entities: &'static [FunctionSpec],
}

impl ModuleTemplate {
    /// Every function spec of the template.
    pub fn specs(&self) -> impl Iterator<Item = &'static FunctionSpec> {
        self.fixed
            .iter()
            .chain(self.per_entity)
            .chain(self.without_entities)
    }
}

/// The template for a tag.
pub fn templates_for(tag: ModuleTag) -> &'static ModuleTemplate {
    match tag {
        ModuleTag::Authentication => &AUTHENTICATION,
        ModuleTag::DataStorage => &DATA_STORAGE,
        ModuleTag::Api => &API,
        ModuleTag::Ui => &UI,
        ModuleTag::Processing => &PROCESSING,
        ModuleTag::Notification => &NOTIFICATION,
        ModuleTag::Search => &SEARCH,
        ModuleTag::Payment => &PAYMENT,
        ModuleTag::Reporting => &REPORTING,
        ModuleTag::Scheduling => &SCHEDULING,
    }
}

/// All templates, in tag order.
pub fn registry() -> impl Iterator<Item = (ModuleTag, &'static ModuleTemplate)> {
    ModuleTag::ALL.into_iter().map(|tag| (tag, templates_for(tag)))
}

static AUTHENTICATION: ModuleTemplate = ModuleTemplate {
    fixed: &[
        FunctionSpec {
            name: "register",
            description: "Create a new account",
            params: &[("email", "string"), ("password", "string"), ("username", "string")],
            steps: &[
                StepSpec::Validate("email", "well-formed address"),
                StepSpec::Validate("password", "meets strength policy"),
                StepSpec::Branch("email already registered", ConflictError),
                StepSpec::Compute("password_hash = hash(password)"),
                StepSpec::Persist(Insert, "{user_table}"),
                StepSpec::Return("new user id"),
            ],
        },
        FunctionSpec {
            name: "login",
            description: "Authenticate credentials and open a session",
            params: &[("email", "string"), ("password", "string")],
            steps: &[
                StepSpec::Validate("email", "present"),
                StepSpec::Persist(Select, "{user_table}"),
                StepSpec::Branch("no user with email", AuthenticationError),
                StepSpec::Branch("password does not match password_hash", AuthenticationError),
                StepSpec::Compute("issue session token"),
                StepSpec::Return("session token"),
            ],
        },
        FunctionSpec {
            name: "logout",
            description: "Revoke a session",
            params: &[("session_token", "string")],
            steps: &[
                StepSpec::Validate("session_token", "present"),
                StepSpec::Branch("session not found", NotFoundError),
                StepSpec::Call("session_store", "revoke token"),
                StepSpec::Return("success"),
            ],
        },
        FunctionSpec {
            name: "reset_password",
            description: "Send a password reset link",
            params: &[("email", "string")],
            steps: &[
                StepSpec::Validate("email", "well-formed address"),
                StepSpec::Persist(Select, "{user_table}"),
                StepSpec::Branch("no user with email", NotFoundError),
                StepSpec::Compute("generate reset token"),
                StepSpec::Call("email_service", "send reset link"),
                StepSpec::Return("success"),
            ],
        },
    ],
    per_entity: &[],
    without_entities: &[],
};

static DATA_STORAGE: ModuleTemplate = ModuleTemplate {
    fixed: &[],
    per_entity: &[
        FunctionSpec {
            name: "create_{entity}",
            description: "Store a new {entity}",
            params: &[("data", "{Entity}")],
            steps: &[
                StepSpec::Validate("data", "required {entity} fields present"),
                StepSpec::Branch("data violates a unique field", ConflictError),
                StepSpec::Persist(Insert, "{entities}"),
                StepSpec::Return("new {entity} id"),
            ],
        },
        FunctionSpec {
            name: "get_{entity}",
            description: "Fetch one {entity} by id",
            params: &[("id", "integer")],
            steps: &[
                StepSpec::Validate("id", "positive integer"),
                StepSpec::Persist(Select, "{entities}"),
                StepSpec::Branch("{entity} not found", NotFoundError),
                StepSpec::Return("{entity}"),
            ],
        },
        FunctionSpec {
            name: "update_{entity}",
            description: "Change an existing {entity}",
            params: &[("id", "integer"), ("data", "{Entity}")],
            steps: &[
                StepSpec::Validate("data", "fields well-formed"),
                StepSpec::Persist(Select, "{entities}"),
                StepSpec::Branch("{entity} not found", NotFoundError),
                StepSpec::Persist(Update, "{entities}"),
                StepSpec::Return("updated {entity}"),
            ],
        },
        FunctionSpec {
            name: "delete_{entity}",
            description: "Remove a {entity}",
            params: &[("id", "integer")],
            steps: &[
                StepSpec::Validate("id", "positive integer"),
                StepSpec::Persist(Select, "{entities}"),
                StepSpec::Branch("{entity} not found", NotFoundError),
                StepSpec::Persist(Delete, "{entities}"),
                StepSpec::Return("success"),
            ],
        },
    ],
    without_entities: &[
        FunctionSpec {
            name: "save_record",
            description: "Store a generic record",
            params: &[("data", "map")],
            steps: &[
                StepSpec::Validate("data", "not empty"),
                StepSpec::Branch("data is malformed", ValidationError),
                StepSpec::Persist(Insert, "records"),
                StepSpec::Return("record id"),
            ],
        },
        FunctionSpec {
            name: "get_record",
            description: "Fetch a generic record",
            params: &[("id", "integer")],
            steps: &[
                StepSpec::Validate("id", "positive integer"),
                StepSpec::Persist(Select, "records"),
                StepSpec::Branch("record not found", NotFoundError),
                StepSpec::Return("record"),
            ],
        },
    ],
};

static API: ModuleTemplate = ModuleTemplate {
    fixed: &[FunctionSpec {
        name: "route_request",
        description: "Dispatch an API request to its handler",
        params: &[("method", "string"), ("path", "string"), ("body", "map")],
        steps: &[
            StepSpec::Validate("path", "matches a known route"),
            StepSpec::Branch("no route matches", NotFoundError),
            StepSpec::Branch("body fails schema validation", ValidationError),
            StepSpec::Call("handler", "dispatch request"),
            StepSpec::Return("response"),
        ],
    }],
    per_entity: &[FunctionSpec {
        name: "list_{entities}",
        description: "Paginated listing endpoint for {entities}",
        params: &[("page", "integer"), ("page_size", "integer")],
        steps: &[
            StepSpec::Validate("page_size", "between 1 and 100"),
            StepSpec::Branch("page out of range", ValidationError),
            StepSpec::Persist(Select, "{entities}"),
            StepSpec::Return("page of {entities}"),
        ],
    }],
    without_entities: &[],
};

static UI: ModuleTemplate = ModuleTemplate {
    fixed: &[
        FunctionSpec {
            name: "render_view",
            description: "Render a named view",
            params: &[("view_name", "string"), ("context", "map")],
            steps: &[
                StepSpec::Validate("view_name", "registered view"),
                StepSpec::Branch("view not found", NotFoundError),
                StepSpec::Compute("bind context to template"),
                StepSpec::Call("renderer", "render view"),
                StepSpec::Return("html"),
            ],
        },
        FunctionSpec {
            name: "handle_form_submission",
            description: "Validate and submit a form",
            params: &[("form", "map")],
            steps: &[
                StepSpec::Validate("form", "required fields present"),
                StepSpec::Branch("form has invalid fields", ValidationError),
                StepSpec::Call("api", "submit form data"),
                StepSpec::Return("redirect to confirmation view"),
            ],
        },
    ],
    per_entity: &[],
    without_entities: &[],
};

static PROCESSING: ModuleTemplate = ModuleTemplate {
    fixed: &[
        FunctionSpec {
            name: "process_job",
            description: "Run a queued background job",
            params: &[("job_id", "integer")],
            steps: &[
                StepSpec::Validate("job_id", "positive integer"),
                StepSpec::Call("job_queue", "fetch job"),
                StepSpec::Branch("job not found", NotFoundError),
                StepSpec::Compute("run job steps"),
                StepSpec::Call("job_queue", "mark job done"),
                StepSpec::Return("job result"),
            ],
        },
        FunctionSpec {
            name: "calculate_result",
            description: "Apply business rules to input data",
            params: &[("input", "map")],
            steps: &[
                StepSpec::Validate("input", "numeric fields present"),
                StepSpec::Branch("input out of range", ValidationError),
                StepSpec::Compute("apply business rules"),
                StepSpec::Call("result_store", "save result"),
                StepSpec::Return("result"),
            ],
        },
    ],
    per_entity: &[],
    without_entities: &[],
};

static NOTIFICATION: ModuleTemplate = ModuleTemplate {
    fixed: &[
        FunctionSpec {
            name: "send_notification",
            description: "Deliver a message to a recipient",
            params: &[("recipient_id", "integer"), ("message", "string"), ("channel", "string")],
            steps: &[
                StepSpec::Validate("message", "not empty"),
                StepSpec::Validate("channel", "one of email, sms, push"),
                StepSpec::Branch("recipient has opted out", ValidationError),
                StepSpec::Call("notification_gateway", "deliver message"),
                StepSpec::Branch("gateway rejected message", DeliveryError),
                StepSpec::Return("delivery id"),
            ],
        },
        FunctionSpec {
            name: "schedule_notification",
            description: "Queue a message for later delivery",
            params: &[("recipient_id", "integer"), ("message", "string"), ("send_at", "datetime")],
            steps: &[
                StepSpec::Validate("send_at", "in the future"),
                StepSpec::Branch("send_at is in the past", ValidationError),
                StepSpec::Call("scheduler", "enqueue send_notification"),
                StepSpec::Return("schedule id"),
            ],
        },
    ],
    per_entity: &[],
    without_entities: &[],
};

static SEARCH: ModuleTemplate = ModuleTemplate {
    fixed: &[],
    per_entity: &[FunctionSpec {
        name: "search_{entities}",
        description: "Full-text search over {entities}",
        params: &[("query", "string"), ("filters", "map")],
        steps: &[
            StepSpec::Validate("query", "at least 2 characters"),
            StepSpec::Branch("query is too short", ValidationError),
            StepSpec::Persist(Select, "{entities}"),
            StepSpec::Compute("rank matches"),
            StepSpec::Return("matching {entities}"),
        ],
    }],
    without_entities: &[FunctionSpec {
        name: "search",
        description: "Full-text search",
        params: &[("query", "string")],
        steps: &[
            StepSpec::Validate("query", "at least 2 characters"),
            StepSpec::Branch("query is too short", ValidationError),
            StepSpec::Call("search_index", "run query"),
            StepSpec::Return("results"),
        ],
    }],
};

static PAYMENT: ModuleTemplate = ModuleTemplate {
    fixed: &[
        FunctionSpec {
            name: "process_payment",
            description: "Charge a payment method",
            params: &[("order_id", "integer"), ("amount", "float"), ("payment_method", "string")],
            steps: &[
                StepSpec::Validate("amount", "greater than zero"),
                StepSpec::Branch("amount is not positive", ValidationError),
                StepSpec::Call("payment_gateway", "charge payment_method"),
                StepSpec::Branch("gateway declined charge", PaymentDeclinedError),
                StepSpec::Persist(Insert, "payments"),
                StepSpec::Return("payment id"),
            ],
        },
        FunctionSpec {
            name: "refund_payment",
            description: "Refund part or all of a payment",
            params: &[("payment_id", "integer"), ("amount", "float")],
            steps: &[
                StepSpec::Validate("amount", "greater than zero"),
                StepSpec::Persist(Select, "payments"),
                StepSpec::Branch("payment not found", NotFoundError),
                StepSpec::Branch("amount exceeds captured total", ValidationError),
                StepSpec::Call("payment_gateway", "refund"),
                StepSpec::Persist(Update, "payments"),
                StepSpec::Return("refund id"),
            ],
        },
        FunctionSpec {
            name: "handle_payment_webhook",
            description: "Apply a payment gateway status callback",
            params: &[("payload", "string"), ("signature", "string")],
            steps: &[
                StepSpec::Validate("signature", "matches gateway secret"),
                StepSpec::Branch("signature invalid", AuthenticationError),
                StepSpec::Persist(Update, "payments"),
                StepSpec::Return("acknowledged"),
            ],
        },
    ],
    per_entity: &[],
    without_entities: &[],
};

static REPORTING: ModuleTemplate = ModuleTemplate {
    fixed: &[
        FunctionSpec {
            name: "generate_report",
            description: "Aggregate records over a date range",
            params: &[("report_type", "string"), ("start_date", "datetime"), ("end_date", "datetime")],
            steps: &[
                StepSpec::Validate("end_date", "after start_date"),
                StepSpec::Branch("date range is empty", ValidationError),
                StepSpec::Call("analytics_store", "run aggregate query"),
                StepSpec::Return("report"),
            ],
        },
        FunctionSpec {
            name: "export_report",
            description: "Serialize a report for download",
            params: &[("report_id", "integer"), ("format", "string")],
            steps: &[
                StepSpec::Validate("format", "csv, pdf or xlsx"),
                StepSpec::Branch("report not found", NotFoundError),
                StepSpec::Compute("serialize report"),
                StepSpec::Call("file_storage", "upload export"),
                StepSpec::Return("download url"),
            ],
        },
    ],
    per_entity: &[],
    without_entities: &[],
};

static SCHEDULING: ModuleTemplate = ModuleTemplate {
    fixed: &[
        FunctionSpec {
            name: "schedule_booking",
            description: "Reserve a time slot",
            params: &[("resource_id", "integer"), ("starts_at", "datetime"), ("ends_at", "datetime")],
            steps: &[
                StepSpec::Validate("ends_at", "after starts_at"),
                StepSpec::Branch("slot overlaps an existing booking", ConflictError),
                StepSpec::Persist(Insert, "bookings"),
                StepSpec::Call("notification_service", "send confirmation"),
                StepSpec::Return("booking id"),
            ],
        },
        FunctionSpec {
            name: "cancel_booking",
            description: "Release a reserved time slot",
            params: &[("booking_id", "integer")],
            steps: &[
                StepSpec::Validate("booking_id", "positive integer"),
                StepSpec::Persist(Select, "bookings"),
                StepSpec::Branch("booking not found", NotFoundError),
                StepSpec::Persist(Update, "bookings"),
                StepSpec::Return("success"),
            ],
        },
    ],
    per_entity: &[],
    without_entities: &[],
};
