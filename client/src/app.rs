//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment, WildcardSegment,
    components::{Route, Router, Routes},
};

use crate::components::{route_outlet::RouteOutlet, toast_host::ToastHost};
use crate::config;
use crate::net::supabase::SupabaseAuth;
use crate::state::{auth::AuthContext, toast::ToastState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the auth context for the lifetime of the app and hands every path
/// to [`RouteOutlet`], which matches it against the guarded route table.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::new(SupabaseAuth::from_build_env(), config::access_policy());
    auth.install();
    provide_context(auth);
    provide_context(RwSignal::new(ToastState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/schoolier.css"/>
        <Title text="Schoolier"/>

        <Router>
            <Routes fallback=|| view! { <RouteOutlet/> }>
                <Route path=StaticSegment("") view=RouteOutlet/>
                <Route path=WildcardSegment("any") view=RouteOutlet/>
            </Routes>
        </Router>
        <ToastHost/>
    }
}
