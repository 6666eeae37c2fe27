//! Backend URL table
//!
//! Every path ends in `/`, matching the backend's routing.

use crate::ApiConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    auth: String,
    users: String,
    recipes: String,
}

impl Endpoints {
    pub fn new(config: &ApiConfig) -> Self {
        let base_url = config.base_url.clone();
        Self {
            auth: format!("{}/api/auth", base_url),
            users: format!("{}/api/users", base_url),
            recipes: format!("{}/api/recipes", base_url),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Auth

    pub fn register(&self) -> String {
        format!("{}/register/", self.auth)
    }

    pub fn login(&self) -> String {
        format!("{}/login/", self.auth)
    }

    pub fn logout(&self) -> String {
        format!("{}/logout/", self.auth)
    }

    pub fn activate(&self) -> String {
        format!("{}/activate/", self.auth)
    }

    pub fn google(&self) -> String {
        format!("{}/google/", self.auth)
    }

    pub fn google_callback(&self) -> String {
        format!("{}/google/callback/", self.auth)
    }

    // Users

    pub fn users(&self) -> String {
        format!("{}/", self.users)
    }

    /// Current user; also the update target
    pub fn me(&self) -> String {
        format!("{}/me/", self.users)
    }

    pub fn delete_me(&self) -> String {
        format!("{}/me/delete/", self.users)
    }

    pub fn user_profile(&self, username: &str) -> String {
        format!("{}/view/{}/", self.users, username)
    }

    // Recipes

    pub fn recipes(&self) -> String {
        format!("{}/", self.recipes)
    }

    pub fn recipes_admin(&self) -> String {
        format!("{}/list/", self.recipes)
    }

    pub fn recipe_create(&self) -> String {
        format!("{}/create/", self.recipes)
    }

    pub fn recipe_random(&self) -> String {
        format!("{}/random/", self.recipes)
    }

    pub fn recipes_deleted(&self) -> String {
        format!("{}/deleted/", self.recipes)
    }

    pub fn recipe(&self, slug: &str) -> String {
        format!("{}/view/{}/", self.recipes, slug)
    }

    /// Per-recipe action such as `update`, see [`RecipeAction`]
    pub fn recipe_action(&self, slug: &str, action: RecipeAction) -> String {
        format!("{}{}/", self.recipe(slug), action.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeAction {
    Update,
    Delete,
    Restore,
    Export,
    Report,
    Ban,
    Like,
    Statistics,
}

impl RecipeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeAction::Update => "update",
            RecipeAction::Delete => "delete",
            RecipeAction::Restore => "restore",
            RecipeAction::Export => "export",
            RecipeAction::Report => "report",
            RecipeAction::Ban => "ban",
            RecipeAction::Like => "like",
            RecipeAction::Statistics => "statistics",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let endpoints = Endpoints::new(&ApiConfig::default());

        assert_eq!(endpoints.register(), "http://0.0.0.0:8000/api/auth/register/");
        assert_eq!(endpoints.google_callback(), "http://0.0.0.0:8000/api/auth/google/callback/");
        assert_eq!(endpoints.users(), "http://0.0.0.0:8000/api/users/");
        assert_eq!(endpoints.me(), "http://0.0.0.0:8000/api/users/me/");
        assert_eq!(endpoints.user_profile("ana"), "http://0.0.0.0:8000/api/users/view/ana/");
        assert_eq!(endpoints.recipes_admin(), "http://0.0.0.0:8000/api/recipes/list/");
    }

    #[test]
    fn test_recipe_actions() {
        let endpoints = Endpoints::new(&ApiConfig::new("https://r.example"));

        assert_eq!(endpoints.recipe("pho"), "https://r.example/api/recipes/view/pho/");
        assert_eq!(
            endpoints.recipe_action("pho", RecipeAction::Statistics),
            "https://r.example/api/recipes/view/pho/statistics/"
        );
        assert_eq!(
            endpoints.recipe_action("pho", RecipeAction::Like),
            "https://r.example/api/recipes/view/pho/like/"
        );
    }
}
