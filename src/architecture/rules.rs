//! Static architecture rules.

use crate::model::{LayerKind, ModuleTag};

/// Base recommendation for a layer, independent of detected modules.
#[derive(Debug, Clone, Copy)]
pub struct LayerBase {
    pub layer: LayerKind,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
}

/// What a detected module adds to one layer.
#[derive(Debug, Clone, Copy)]
pub struct LayerRule {
    pub tag: ModuleTag,
    pub layer: LayerKind,
    pub technologies: &'static [&'static str],
    pub consideration: &'static str,
}

pub(super) static BASES: &[LayerBase] = &[
    LayerBase {
        layer: LayerKind::Presentation,
        description: "User-facing web client",
        technologies: &["HTML5", "CSS3", "JavaScript", "React/Vue.js"],
    },
    LayerBase {
        layer: LayerKind::Business,
        description: "Application services and domain logic",
        technologies: &["Python/Flask", "Node.js/Express", "Java/Spring Boot"],
    },
    LayerBase {
        layer: LayerKind::Data,
        description: "Persistence and storage",
        technologies: &["PostgreSQL", "MySQL", "MongoDB"],
    },
];

pub(super) static RULES: &[LayerRule] = &[
    // Presentation
    LayerRule {
        tag: ModuleTag::Ui,
        layer: LayerKind::Presentation,
        technologies: &["Tailwind CSS/Bootstrap"],
        consideration: "Design responsive layouts that meet WCAG 2.1 accessibility guidelines",
    },
    LayerRule {
        tag: ModuleTag::Authentication,
        layer: LayerKind::Presentation,
        technologies: &[],
        consideration: "Keep session tokens in HttpOnly, Secure cookies rather than local storage",
    },
    LayerRule {
        tag: ModuleTag::Search,
        layer: LayerKind::Presentation,
        technologies: &[],
        consideration: "Debounce search input and paginate results",
    },
    LayerRule {
        tag: ModuleTag::Payment,
        layer: LayerKind::Presentation,
        technologies: &["Stripe Elements"],
        consideration: "Collect card details in hosted payment fields to keep them off your pages",
    },
    LayerRule {
        tag: ModuleTag::Reporting,
        layer: LayerKind::Presentation,
        technologies: &["Chart.js/D3.js"],
        consideration: "Render large reports incrementally",
    },
    LayerRule {
        tag: ModuleTag::Scheduling,
        layer: LayerKind::Presentation,
        technologies: &["FullCalendar"],
        consideration: "Show times in the viewer's time zone",
    },
    // Business
    LayerRule {
        tag: ModuleTag::Authentication,
        layer: LayerKind::Business,
        technologies: &["JWT/OAuth2", "bcrypt/Argon2"],
        consideration: "Hash passwords with a slow hash and rate-limit login attempts",
    },
    LayerRule {
        tag: ModuleTag::Api,
        layer: LayerKind::Business,
        technologies: &["REST", "OpenAPI/Swagger"],
        consideration: "Version the API and validate request bodies against a schema",
    },
    LayerRule {
        tag: ModuleTag::Processing,
        layer: LayerKind::Business,
        technologies: &["Celery/BullMQ"],
        consideration: "Make background jobs idempotent so retries are safe",
    },
    LayerRule {
        tag: ModuleTag::Notification,
        layer: LayerKind::Business,
        technologies: &["SendGrid/Twilio", "Message queue"],
        consideration: "Send notifications asynchronously with retries and opt-out handling",
    },
    LayerRule {
        tag: ModuleTag::Payment,
        layer: LayerKind::Business,
        technologies: &["Stripe/PayPal SDK"],
        consideration: "PCI DSS compliance: never store raw card numbers and verify webhook signatures",
    },
    LayerRule {
        tag: ModuleTag::Reporting,
        layer: LayerKind::Business,
        technologies: &["Celery/BullMQ"],
        consideration: "Run heavy aggregations off the request path",
    },
    LayerRule {
        tag: ModuleTag::Scheduling,
        layer: LayerKind::Business,
        technologies: &["Cron scheduler"],
        consideration: "Check for double bookings inside a transaction",
    },
    // Data
    LayerRule {
        tag: ModuleTag::DataStorage,
        layer: LayerKind::Data,
        technologies: &["ORM", "Schema migrations"],
        consideration: "Normalize to third normal form and index every foreign key",
    },
    LayerRule {
        tag: ModuleTag::Authentication,
        layer: LayerKind::Data,
        technologies: &["Redis"],
        consideration: "Store only password hashes and keep sessions in a fast expiring store",
    },
    LayerRule {
        tag: ModuleTag::Search,
        layer: LayerKind::Data,
        technologies: &["Elasticsearch/OpenSearch"],
        consideration: "Keep the search index in sync with the primary database",
    },
    LayerRule {
        tag: ModuleTag::Processing,
        layer: LayerKind::Data,
        technologies: &["Redis"],
        consideration: "Persist job state so work survives restarts",
    },
    LayerRule {
        tag: ModuleTag::Payment,
        layer: LayerKind::Data,
        technologies: &[],
        consideration: "Keep an append-only ledger of payment transactions",
    },
    LayerRule {
        tag: ModuleTag::Reporting,
        layer: LayerKind::Data,
        technologies: &["Read replica/data warehouse"],
        consideration: "Separate analytical queries from transactional load",
    },
    LayerRule {
        tag: ModuleTag::Scheduling,
        layer: LayerKind::Data,
        technologies: &[],
        consideration: "Store timestamps in UTC",
    },
];
