//! Plain-text views of page state

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt::{Debug, Write};

use core_kernel::FieldErrors;
use infra_http::PortalApi;

use crate::notify::Notice;
use crate::pages::{ClaimsPage, DashboardPage, PoliciesPage};
use crate::portal::Portal;

/// Formats an amount as dollars with thousands separators, e.g. `$1,200.50`
pub fn amount(value: Decimal) -> String {
    let rounded = format!("{:.2}", value.round_dp(2).abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

pub fn date(value: NaiveDate) -> String {
    value.format("%b %-d, %Y").to_string()
}

pub fn timestamp(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

pub fn notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| format!("[{}] {}\n", n.level, n.message))
        .collect()
}

/// One `field: message` line per failing field, in form order
pub fn field_errors<F: Ord + Copy + Debug>(errors: &FieldErrors<F>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {:?}: {}\n", field, message))
        .collect()
}

pub fn nav<A: PortalApi>(portal: &Portal<A>) -> String {
    let links = portal.nav_links();
    if links.is_empty() {
        return "Login | Register".to_string();
    }
    let current = portal.navigator().current();
    links
        .iter()
        .map(|(route, label)| {
            if *route == current {
                format!("[{}]", label)
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn dashboard<A: PortalApi>(page: &DashboardPage<A>) -> String {
    let stats = page.stats();
    let mut out = String::new();
    let _ = writeln!(out, "{}", page.greeting());
    let _ = writeln!(
        out,
        "Policies: {} ({} active)",
        stats.total_policies, stats.active_policies
    );
    let _ = writeln!(
        out,
        "Claims: {} ({} pending)",
        stats.total_claims, stats.pending_claims
    );
    let _ = writeln!(out, "Total premium: {}", amount(stats.total_premium));
    let _ = writeln!(out, "Approved claims: {}", amount(stats.approved_claims_amount));

    let _ = writeln!(out, "\nRecent policies");
    if page.recent_policies().is_empty() {
        let _ = writeln!(out, "  No policies yet");
    }
    for policy in page.recent_policies() {
        let _ = writeln!(
            out,
            "  {}  {:<10} {:<9} {}",
            policy.label(),
            policy.policy_type,
            policy.status,
            amount(policy.premium_amount)
        );
    }

    let _ = writeln!(out, "\nRecent claims");
    if page.recent_claims().is_empty() {
        let _ = writeln!(out, "  No claims submitted");
    }
    for claim in page.recent_claims() {
        let _ = writeln!(
            out,
            "  {}  {:<12} {}  {}",
            claim.id,
            claim.status,
            amount(claim.claim_amount),
            claim.description
        );
    }
    out
}

pub fn policies<A: PortalApi>(page: &PoliciesPage<A>) -> String {
    let mut out = String::new();
    if page.visible().is_empty() {
        let _ = writeln!(out, "No policies found");
        if page.has_active_filter() {
            let _ = writeln!(out, "Try adjusting your filters");
        } else {
            let _ = writeln!(out, "Get started by adding your first policy");
        }
        return out;
    }

    for policy in page.visible() {
        let _ = writeln!(
            out,
            "{}  {:<20} {:<10} {:<9} {:>12}  {} - {}",
            policy.id,
            policy.insurer,
            policy.policy_type,
            policy.status,
            amount(policy.premium_amount),
            date(policy.start_date),
            date(policy.end_date)
        );
    }
    out
}

pub fn claims<A: PortalApi>(page: &ClaimsPage<A>) -> String {
    let mut out = String::new();
    if !page.can_file_claim() {
        let _ = writeln!(out, "{}", crate::pages::claims::NO_ACTIVE_POLICY);
    }
    if page.visible().is_empty() {
        let _ = writeln!(out, "No claims found");
        if page.has_active_filter() {
            let _ = writeln!(out, "Try adjusting your filters");
        } else {
            let _ = writeln!(out, "File your first claim to get started");
        }
        return out;
    }

    for claim in page.visible() {
        let policy = page
            .policy_for(claim)
            .map(|p| p.label())
            .unwrap_or_else(|| claim.policy_id.to_string());
        let actions = page.actions_for(claim);
        let mut marks = Vec::new();
        if actions.can_edit {
            marks.push("edit");
        }
        if actions.can_delete {
            marks.push("delete");
        }
        let _ = writeln!(
            out,
            "{}  {:<12} {:>12}  {}  {}  {}{}",
            claim.id,
            claim.status,
            amount(claim.claim_amount),
            timestamp(claim.submitted_at),
            policy,
            claim.description,
            if marks.is_empty() {
                String::new()
            } else {
                format!("  ({})", marks.join(", "))
            }
        );
    }
    out
}
