//! Static route table of the application.
//!
//! SYSTEM CONTEXT
//! ==============
//! Screens are declared once here. [`ROUTES`] is the validated tree that
//! [`RouteOutlet`](crate::components::route_outlet::RouteOutlet) matches the
//! current URL against; every protected level is wrapped by the guard.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::sync::LazyLock;

use leptos::prelude::*;

use access::route::Params;
use access::{Role, RouteDefinition, RouteTree};

use crate::components::under_development::UnderDevelopment;
use crate::pages::{
    account_type::AccountTypePage,
    admin::AdminPage,
    business::BusinessPage,
    courses::{CourseDetailPage, CoursesPage},
    dashboard::{DashboardHome, DashboardLayout},
    forgot_password::ForgotPasswordPage,
    home::HomePage,
    instructor::InstructorPage,
    login::LoginPage,
    messages::MessagesPage,
    not_found::NotFoundPage,
    student::StudentPage,
};

/// Every screen the router can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Courses,
    CourseDetail,
    AccountType,
    Login,
    ForgotPassword,
    DashboardLayout,
    DashboardHome,
    StudentArea,
    InstructorArea,
    BusinessArea,
    AdminArea,
    Messages,
    /// Admin tool that has no screen yet.
    Placeholder(&'static str),
    NotFound,
}

const ADMINS: [Role; 2] = [Role::Admin, Role::SuperAdmin];

/// The application's routes in priority order.
pub fn route_table() -> Vec<RouteDefinition<Screen>> {
    vec![
        RouteDefinition::public("", Screen::Home),
        RouteDefinition::public("courses", Screen::Courses),
        RouteDefinition::public("courses/:course_id", Screen::CourseDetail),
        RouteDefinition::public("account-type", Screen::AccountType),
        RouteDefinition::public("login", Screen::Login),
        RouteDefinition::public("forgot-password", Screen::ForgotPassword),
        RouteDefinition::protected("dashboard", Screen::DashboardLayout).with_children(vec![
            RouteDefinition::protected("", Screen::DashboardHome),
            RouteDefinition::with_roles("student", Screen::StudentArea, [Role::Student]),
            RouteDefinition::with_roles("instructor", Screen::InstructorArea, [Role::Instructor]),
            RouteDefinition::with_roles("business", Screen::BusinessArea, [Role::BusinessAdmin]),
            RouteDefinition::with_roles("admin", Screen::AdminArea, ADMINS),
            RouteDefinition::with_roles("admin/users", Screen::Placeholder("User management"), ADMINS),
            RouteDefinition::with_roles("admin/reports", Screen::Placeholder("Reports"), ADMINS),
            RouteDefinition::with_roles("admin/settings", Screen::Placeholder("Platform settings"), [Role::SuperAdmin]),
            RouteDefinition::with_roles(
                "staff",
                Screen::Placeholder("Staff tools"),
                [Role::Employee, Role::Admin, Role::SuperAdmin],
            ),
            RouteDefinition::protected("messages", Screen::Messages),
        ]),
        RouteDefinition::public("*", Screen::NotFound),
    ]
}

/// Validated route tree. An invalid table is logged and leaves the tree
/// empty, so every path renders the not-found screen.
pub static ROUTES: LazyLock<RouteTree<Screen>> = LazyLock::new(|| {
    RouteTree::build(route_table()).unwrap_or_else(|e| {
        log::error!("{e}");
        RouteTree::default()
    })
});

impl Screen {
    /// Render the screen. Layouts place `outlet` in their content area;
    /// other screens ignore it.
    pub fn render(self, params: &Params, outlet: AnyView) -> AnyView {
        match self {
            Self::Home => view! { <HomePage/> }.into_any(),
            Self::Courses => view! { <CoursesPage/> }.into_any(),
            Self::CourseDetail => {
                let course_id = params.get("course_id").cloned().unwrap_or_default();
                view! { <CourseDetailPage course_id=course_id/> }.into_any()
            }
            Self::AccountType => view! { <AccountTypePage/> }.into_any(),
            Self::Login => view! { <LoginPage/> }.into_any(),
            Self::ForgotPassword => view! { <ForgotPasswordPage/> }.into_any(),
            Self::DashboardLayout => view! { <DashboardLayout>{outlet}</DashboardLayout> }.into_any(),
            Self::DashboardHome => view! { <DashboardHome/> }.into_any(),
            Self::StudentArea => view! { <StudentPage/> }.into_any(),
            Self::InstructorArea => view! { <InstructorPage/> }.into_any(),
            Self::BusinessArea => view! { <BusinessPage/> }.into_any(),
            Self::AdminArea => view! { <AdminPage/> }.into_any(),
            Self::Messages => view! { <MessagesPage/> }.into_any(),
            Self::Placeholder(feature) => view! { <UnderDevelopment feature=feature/> }.into_any(),
            Self::NotFound => view! { <NotFoundPage/> }.into_any(),
        }
    }
}
