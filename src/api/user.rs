use serde::Deserialize;

/// Body of `GET /user/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserStatus {
    pub logged_in: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub can_access_panel: bool,
}

impl UserStatus {
    /// Navigation entries the signed-in menu offers.
    pub fn menu_links(&self) -> Vec<&'static str> {
        if !self.logged_in {
            return vec!["/login", "/register"];
        }

        let mut links = vec!["/profil"];
        if self.can_access_panel {
            links.push("/panel");
        }
        if self.is_admin {
            links.push("/admin");
        }
        links.push("/logout");
        links
    }
}
