//! Static route rule table
//!
//! Compiled once at process start; never mutated afterwards, so it is safe
//! for unlimited concurrent readers. Entries with `method: None` apply to
//! every method; method-specific entries act as overrides and are the
//! normal form for paths whose actions differ by verb. `self_scope` marks
//! routes a caller may reach on their own record without any grant.

use crate::domain::{Action, Resource};

pub(super) struct RuleSpec {
    pub pattern: &'static str,
    /// `None` applies to every method.
    pub method: Option<&'static str>,
    pub action: Action,
    pub resource: Resource,
    pub self_scope: bool,
}

const fn rule(
    pattern: &'static str,
    method: Option<&'static str>,
    action: Action,
    resource: Resource,
) -> RuleSpec {
    RuleSpec {
        pattern,
        method,
        action,
        resource,
        self_scope: false,
    }
}

const fn self_rule(
    pattern: &'static str,
    method: Option<&'static str>,
    action: Action,
    resource: Resource,
) -> RuleSpec {
    RuleSpec {
        pattern,
        method,
        action,
        resource,
        self_scope: true,
    }
}

pub(super) const RULES: &[RuleSpec] = &[
    // Users
    rule("/api/users", Some("GET"), Action::Read, Resource::User),
    rule("/api/users", Some("POST"), Action::Create, Resource::User),
    self_rule("/api/users/profile/me/:user_id", Some("GET"), Action::Read, Resource::User),
    self_rule("/api/users/profile/me/:user_id", Some("PUT"), Action::Update, Resource::User),
    rule("/api/users/:user_id", Some("GET"), Action::Read, Resource::User),
    rule("/api/users/:user_id", Some("PUT"), Action::Update, Resource::User),
    rule("/api/users/:user_id", Some("DELETE"), Action::Delete, Resource::User),
    // Organizations
    rule("/api/organizations", Some("GET"), Action::Read, Resource::Organization),
    rule("/api/organizations", Some("POST"), Action::Create, Resource::Organization),
    rule("/api/organizations/:organization_id", Some("GET"), Action::Read, Resource::Organization),
    rule("/api/organizations/:organization_id", Some("PUT"), Action::Update, Resource::Organization),
    rule("/api/organizations/:organization_id", Some("DELETE"), Action::Delete, Resource::Organization),
    rule("/api/organizations/:organization_id/members", Some("GET"), Action::Read, Resource::User),
    // Roles
    rule("/api/roles", Some("GET"), Action::Read, Resource::Role),
    rule("/api/roles", Some("POST"), Action::Create, Resource::Role),
    rule("/api/roles/:role_id", Some("GET"), Action::Read, Resource::Role),
    rule("/api/roles/:role_id", Some("PUT"), Action::Update, Resource::Role),
    rule("/api/roles/:role_id", Some("DELETE"), Action::Delete, Resource::Role),
    // Leads
    rule("/api/leads", Some("GET"), Action::Read, Resource::LeadForm),
    rule("/api/leads", Some("POST"), Action::Create, Resource::LeadForm),
    rule("/api/leads/:lead_id", Some("GET"), Action::Read, Resource::LeadForm),
    rule("/api/leads/:lead_id", Some("PUT"), Action::Update, Resource::LeadForm),
    rule("/api/leads/:lead_id", Some("DELETE"), Action::Delete, Resource::LeadForm),
    rule("/api/leads/:lead_id/notes", None, Action::Read, Resource::LeadForm),
    rule("/api/lead-forms", Some("GET"), Action::Read, Resource::LeadForm),
    rule("/api/lead-forms", Some("POST"), Action::Create, Resource::LeadForm),
    // Chat
    rule("/api/chat/messages", Some("GET"), Action::Chat, Resource::ChatMessage),
    rule("/api/chat/messages", Some("POST"), Action::Post, Resource::ChatMessage),
    rule("/api/chat/messages/:message_id", Some("GET"), Action::Chat, Resource::ChatMessage),
    rule("/api/chat/messages/:message_id", Some("DELETE"), Action::Delete, Resource::ChatMessage),
    // Attachments
    rule("/api/attachments", Some("POST"), Action::Create, Resource::Attachment),
    rule("/api/attachments/:attachment_id", Some("GET"), Action::Read, Resource::Attachment),
    rule("/api/attachments/:attachment_id", Some("DELETE"), Action::Delete, Resource::Attachment),
    // Billing
    rule("/api/billing/invoices", Some("GET"), Action::Read, Resource::Billing),
    rule("/api/billing/subscription", Some("GET"), Action::Read, Resource::Billing),
    rule("/api/billing/subscription", Some("PUT"), Action::Manage, Resource::Billing),
    // Reports. The summary rule is declared after the parameterized entry;
    // literal matches must still win.
    rule("/api/reports", Some("GET"), Action::Read, Resource::Report),
    rule("/api/reports/:report_id", Some("GET"), Action::Read, Resource::Report),
    rule("/api/reports/summary", Some("GET"), Action::Read, Resource::Dashboard),
    // Dashboard
    rule("/api/dashboard", None, Action::Read, Resource::Dashboard),
    // Settings
    rule("/api/settings", Some("GET"), Action::Read, Resource::Settings),
    rule("/api/settings", Some("PUT"), Action::Update, Resource::Settings),
];
