//! Portal Interface Layer
//!
//! Page controllers for the insurance self-service portal, the notice
//! queue they report into, plain-text views, and the `insure-portal` CLI.
//!
//! # Architecture
//!
//! - **Portal**: backend port, session, navigator and notices shared by all pages
//! - **Pages**: login, register, dashboard, policies, claims
//! - **Views**: text rendering of page state
//! - **Activity**: loading/busy flags a view can watch while a call is pending
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_portal::Portal;
//!
//! let portal = Portal::new(client, session, navigator);
//! let mut dashboard = portal.dashboard_page();
//! dashboard.load().await;
//! println!("{}", interface_portal::view::dashboard(&dashboard));
//! ```

pub mod activity;
pub mod notify;
pub mod pages;
pub mod portal;
pub mod view;

pub use activity::{Activity, ActivityGuard};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use pages::{ClaimsPage, DashboardPage, DashboardStats, LoginPage, PoliciesPage, RegisterPage};
pub use portal::Portal;
