//! Router for the group dashboard page

use std::sync::{Arc, LazyLock};

use axum::{Router, response::Html};
use handlebars::Handlebars;
use http::StatusCode;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

const GROUP_DASHBOARD: &str = "GroupDashboard";

// Group data lives outside this service, the page loads it client
// side and shows loading and error states until then.
const GROUP_DASHBOARD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{title}}</title>
</head>
<body>
  <div id="dashboard" data-source="{{data_url}}">
    <h1>{{title}}</h1>
    <div id="status">Loading...</div>
  </div>
  <script>
    (async () => {
      const root = document.getElementById("dashboard");
      const status = document.getElementById("status");
      try {
        const response = await fetch(root.dataset.source);
        if (!response.ok) {
          status.textContent = "Failed to fetch data";
          return;
        }
        const data = await response.json();
        status.innerHTML = "";
        for (const line of [
          `Group Name: ${data.groupName}`,
          `Number of Members: ${data.numMembers}`,
        ]) {
          const p = document.createElement("p");
          p.textContent = line;
          status.appendChild(p);
        }
      } catch (err) {
        console.error("Error fetching dashboard data:", err);
        status.textContent = "Error fetching data";
      }
    })();
  </script>
</body>
</html>
"#;

// Parsed once on first use and shared by every request
static TEMPLATES: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut registry = Handlebars::new();
    registry
        .register_template_string(GROUP_DASHBOARD, GROUP_DASHBOARD_PAGE)
        .expect("Failed to register template");
    registry
});

pub fn templates() -> &'static Handlebars<'static> {
    &TEMPLATES
}

pub fn render_dashboard(ctx: &public::DashboardContext) -> Result<String, ApiError> {
    templates().render(GROUP_DASHBOARD, ctx).map_err(|e| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render dashboard: {}", e),
        )
    })
}

async fn group_dashboard_handler() -> Result<Html<String>, ApiError> {
    let ctx = public::DashboardContext {
        title: "Group Dashboard".to_string(),
        data_url: "/api/group".to_string(),
    };
    Ok(Html(render_dashboard(&ctx)?))
}

/// Create the group dashboard router
pub fn router() -> Router<SharedState> {
    Router::new().route("/group", axum::routing::get(group_dashboard_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> public::DashboardContext {
        public::DashboardContext {
            title: "Group Dashboard".to_string(),
            data_url: "/api/group".to_string(),
        }
    }

    #[test]
    fn it_renders_the_loading_state() {
        let html = render_dashboard(&dashboard()).unwrap();
        assert!(html.contains("<h1>Group Dashboard</h1>"));
        assert!(html.contains("Loading..."));
        assert!(html.contains(r#"data-source="/api/group""#));
        assert!(html.contains("Failed to fetch data"));
    }

    #[test]
    fn it_escapes_context_values() {
        let html = render_dashboard(&public::DashboardContext {
            title: "<Ops>".to_string(),
            ..dashboard()
        })
        .unwrap();
        assert!(html.contains("<h1>&lt;Ops&gt;</h1>"));
    }

    #[test]
    fn it_reuses_the_template_registry() {
        assert!(std::ptr::eq(templates(), templates()));
        let first = render_dashboard(&dashboard()).unwrap();
        let second = render_dashboard(&dashboard()).unwrap();
        assert_eq!(first, second);
    }
}
