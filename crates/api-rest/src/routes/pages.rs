//! Navigable page routes.
//!
//! The route table below is the application's navigation surface: an
//! immutable list of `{path, name, component}` descriptors registered into
//! the router once at start-up. Registration walks the table, so the router
//! and the table cannot drift apart.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, MethodRouter};
use axum::Router;
use cv_screen_application::services::ServiceContext;
use maud::{html, Markup, DOCTYPE};
use uuid::Uuid;

/// A navigable page: a URL path, a symbolic name for programmatic
/// reference, and the component that renders it.
pub struct PageRoute {
    /// URL path, unique within the table
    pub path: &'static str,
    /// Symbolic name, unique within the table
    pub name: &'static str,
    /// View component rendering the page
    component: fn() -> MethodRouter<AppState>,
}

/// The application's page routes.
pub static PAGE_ROUTES: &[PageRoute] = &[
    PageRoute {
        path: "/",
        name: "Home",
        component: home_component,
    },
    PageRoute {
        path: "/cv-analysis",
        name: "CvAnalysis",
        component: cv_analysis_component,
    },
];

fn home_component() -> MethodRouter<AppState> {
    get(home)
}

fn cv_analysis_component() -> MethodRouter<AppState> {
    get(cv_analysis)
}

/// Build the page router from the route table.
pub fn routes() -> Router<AppState> {
    PAGE_ROUTES
        .iter()
        .fold(Router::new(), |router, route| {
            router.route(route.path, (route.component)())
        })
}

/// Look up a page route by name.
pub fn route_by_name(name: &str) -> Option<&'static PageRoute> {
    PAGE_ROUTES.iter().find(|route| route.name == name)
}

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " - CV-Screen" }
            }
            body {
                nav {
                    @for route in PAGE_ROUTES {
                        a href=(route.path) { (route.name) }
                        " "
                    }
                }
                main { (body) }
            }
        }
    }
}

/// Home dashboard: platform-wide counts.
async fn home(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let ctx = ServiceContext::new(Uuid::new_v4().to_string());

    let jobs = state.job_service.count(&ctx).await?;
    let candidates = state.candidate_service.count(&ctx).await?;
    let shortlisted = state.shortlist_service.count(&ctx).await?;

    let body = html! {
        h1 { "Dashboard" }
        ul {
            li { (jobs) " jobs" }
            li { (candidates) " candidates" }
            li { (shortlisted) " shortlisted" }
        }
        p { a href="/cv-analysis" { "Upload CVs for analysis" } }
    };

    Ok(Html(layout("Home", body).into_string()))
}

/// CV upload and analysis page.
async fn cv_analysis() -> Html<String> {
    let body = html! {
        h1 { "CV Analysis" }
        p { "Upload candidate CVs to score them against a job." }
        form method="post" enctype="multipart/form-data" action="/api/v1/candidates/import-all" {
            label for="files" { "CV files (plain text)" }
            input type="file" id="files" name="files" multiple accept=".txt";
            button type="submit" { "Analyze" }
        }
    };

    Html(layout("CV Analysis", body).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_route_table_paths_are_unique() {
        let paths: HashSet<_> = PAGE_ROUTES.iter().map(|r| r.path).collect();
        assert_eq!(paths.len(), PAGE_ROUTES.len());
    }

    #[test]
    fn test_route_table_names_are_unique() {
        let names: HashSet<_> = PAGE_ROUTES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), PAGE_ROUTES.len());
    }

    #[test]
    fn test_expected_routes_present() {
        assert_eq!(route_by_name("Home").map(|r| r.path), Some("/"));
        assert_eq!(route_by_name("CvAnalysis").map(|r| r.path), Some("/cv-analysis"));
        assert!(route_by_name("Missing").is_none());
    }
}
