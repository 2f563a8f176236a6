use bizmodel_macro::state_enum;

/// Organization lifecycle.
#[state_enum(module = "party")]
pub enum OrganizationState {
    Active,
    Suspended,
    Closed,
}

/// Device lifecycle.
#[state_enum(module = "device")]
pub enum DeviceState {
    /// Known to the platform, not yet reporting.
    Registered,
    Active,
    Inactive,
    Decommissioned,
}

/// Invoice lifecycle.
#[state_enum(module = "billing")]
pub enum InvoiceState {
    Draft,
    Issued,
    PartiallyPaid,
    Paid,
    Cancelled,
}

/// Payment lifecycle.
#[state_enum(module = "billing")]
pub enum PaymentState {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// Order lifecycle.
#[state_enum(module = "sales")]
pub enum OrderState {
    New,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}
