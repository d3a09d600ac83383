//! Built-in vocabulary.
//!
//! Module keyword lists start from the classic eight analyzer categories and
//! add the phrase and past-tense forms singularization cannot reach. Plural
//! nouns need no entries: the index matches them through their singular.

use crate::model::ModuleTag;

pub(super) static MODULE_KEYWORDS: &[(ModuleTag, &[&str])] = &[
    (
        ModuleTag::Authentication,
        &[
            "login", "log in", "logout", "log out", "sign in", "sign out", "signup", "sign up",
            "register", "registered", "registration", "authenticate", "authentication", "user",
            "password", "permission",
        ],
    ),
    (
        ModuleTag::DataStorage,
        &[
            "store", "stored", "save", "saved", "database", "persist", "persisted", "record",
            "recorded", "storage",
        ],
    ),
    (
        ModuleTag::Api,
        &[
            "api", "endpoint", "rest", "interface", "integration", "integrate", "webhook",
            "third party",
        ],
    ),
    (
        ModuleTag::Ui,
        &[
            "display", "displayed", "show", "view", "interface", "dashboard", "page", "screen",
            "form", "ui", "user interface",
        ],
    ),
    (
        ModuleTag::Processing,
        &[
            "process", "processed", "calculate", "calculated", "calculation", "compute",
            "computed", "analyze", "analyse",
        ],
    ),
    (
        ModuleTag::Notification,
        &[
            "notify", "notified", "notification", "alert", "email", "send", "sent", "sms",
            "push notification",
        ],
    ),
    (
        ModuleTag::Search,
        &["search", "find", "query", "filter", "browse", "sort", "lookup", "look up"],
    ),
    (
        ModuleTag::Payment,
        &[
            "payment", "pay", "paid", "checkout", "check out", "transaction", "purchase",
            "purchased", "refund", "billing", "invoice",
        ],
    ),
    (
        ModuleTag::Reporting,
        &[
            "report", "reporting", "analytics", "statistics", "chart", "export", "metrics",
            "insight",
        ],
    ),
    (
        ModuleTag::Scheduling,
        &[
            "schedule", "scheduled", "scheduling", "book", "booked", "booking", "appointment",
            "reservation", "calendar", "reminder",
        ],
    ),
];

pub(super) static ENTITY_KEYWORDS: &[(&str, &[&str])] = &[
    ("User", &["user", "end user"]),
    ("Customer", &["customer", "client", "buyer"]),
    ("Admin", &["admin", "administrator"]),
    ("Account", &["account"]),
    ("Profile", &["profile"]),
    ("Role", &["role"]),
    ("Order", &["order", "purchase order"]),
    ("Item", &["item"]),
    ("LineItem", &["line item"]),
    ("Product", &["product"]),
    ("Category", &["category"]),
    ("Cart", &["cart", "shopping cart", "basket"]),
    ("Payment", &["payment"]),
    ("Invoice", &["invoice"]),
    ("Transaction", &["transaction"]),
    ("Review", &["review"]),
    ("Comment", &["comment"]),
    ("Post", &["post", "blog post", "article"]),
    ("Message", &["message"]),
    ("Notification", &["notification"]),
    ("Address", &["address", "shipping address"]),
    ("Employee", &["employee", "staff member"]),
    ("Department", &["department"]),
    ("Project", &["project"]),
    ("Task", &["task"]),
    ("Ticket", &["ticket"]),
    ("Booking", &["booking", "reservation"]),
    ("Appointment", &["appointment"]),
    ("Room", &["room"]),
    ("Event", &["event"]),
    ("Course", &["course"]),
    ("Student", &["student"]),
    ("Teacher", &["teacher", "instructor"]),
    ("Patient", &["patient"]),
    ("Doctor", &["doctor", "physician"]),
    ("Vendor", &["vendor", "supplier", "seller"]),
    ("Shipment", &["shipment", "delivery"]),
    ("Subscription", &["subscription"]),
    ("Document", &["document", "file"]),
    ("Report", &["report"]),
    ("Team", &["team"]),
    ("Inventory", &["inventory"]),
    ("Coupon", &["coupon", "voucher", "discount code"]),
];

/// (keyword, field name, not null, unique). Types come from the type hints.
pub(super) static ATTRIBUTE_KEYWORDS: &[(&str, &str, bool, bool)] = &[
    ("email", "email", true, true),
    ("email address", "email", true, true),
    ("password", "password_hash", true, false),
    ("username", "username", true, true),
    ("user name", "username", true, true),
    ("name", "name", true, false),
    ("full name", "full_name", true, false),
    ("first name", "first_name", true, false),
    ("last name", "last_name", true, false),
    ("title", "title", true, false),
    ("description", "description", false, false),
    ("content", "content", false, false),
    ("bio", "bio", false, false),
    ("note", "notes", false, false),
    ("price", "price", true, false),
    ("amount", "amount", true, false),
    ("total", "total", false, false),
    ("cost", "cost", false, false),
    ("discount", "discount", false, false),
    ("tax", "tax", false, false),
    ("balance", "balance", false, false),
    ("weight", "weight", false, false),
    ("score", "score", false, false),
    ("quantity", "quantity", true, false),
    ("stock", "stock_quantity", false, false),
    ("rating", "rating", false, false),
    ("age", "age", false, false),
    ("capacity", "capacity", false, false),
    ("duration", "duration_minutes", false, false),
    ("status", "status", true, false),
    ("phone", "phone", false, false),
    ("phone number", "phone", false, false),
    ("currency", "currency", false, false),
    ("sku", "sku", true, true),
    ("location", "location", false, false),
    ("url", "url", false, false),
    ("link", "url", false, false),
    ("image", "image_url", false, false),
    ("photo", "image_url", false, false),
    ("date", "date", false, false),
    ("due date", "due_date", false, false),
    ("deadline", "deadline", false, false),
    ("birthday", "birth_date", false, false),
    ("birth date", "birth_date", false, false),
    ("date of birth", "birth_date", false, false),
    ("start time", "starts_at", false, false),
    ("end time", "ends_at", false, false),
    ("active", "is_active", true, false),
    ("verified", "is_verified", true, false),
    ("published", "is_published", true, false),
];
