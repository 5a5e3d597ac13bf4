use axum::{extract::State, http::HeaderMap, Json};

use crate::auth::middleware::authenticate;
use crate::dto::{NavLink, NavResponse};
use crate::AppState;

const SIGNED_IN_LINKS: &[NavLink] = &[
    NavLink {
        label: "Dashboard",
        path: "/",
    },
    NavLink {
        label: "Check In",
        path: "/checkin",
    },
    NavLink {
        label: "Settings",
        path: "/settings",
    },
    NavLink {
        label: "Admin",
        path: "/admin",
    },
];

/// Signed-out visitors get no navigation; the shell only renders the page.
pub fn nav_for(authenticated: bool) -> NavResponse {
    let links: &[NavLink] = if authenticated { SIGNED_IN_LINKS } else { &[] };

    NavResponse {
        authenticated,
        links: links
            .iter()
            .map(|l| NavLink {
                label: l.label,
                path: l.path,
            })
            .collect(),
        can_sign_out: authenticated,
    }
}

/// Public; a bad or missing token just yields the signed-out shell.
pub async fn get_nav(State(state): State<AppState>, headers: HeaderMap) -> Json<NavResponse> {
    let authenticated = authenticate(&headers, &state.config).is_ok();
    Json(nav_for(authenticated))
}
