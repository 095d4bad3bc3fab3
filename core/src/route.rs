//! Navigation targets the client asks its host to show.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    UserLogin,
    AdminLogin,
    /// Item editor, pre-filled with the given item.
    AdminAddItem { id: u64 },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::UserLogin => "/user-login".to_string(),
            Route::AdminLogin => "/admin-login".to_string(),
            Route::AdminAddItem { id } => format!("/admin/additem?id={id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::UserLogin.path(), "/user-login");
        assert_eq!(Route::AdminLogin.to_string(), "/admin-login");
        assert_eq!(Route::AdminAddItem { id: 501 }.path(), "/admin/additem?id=501");
    }
}
