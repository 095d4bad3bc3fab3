//! Terminal host for the groceteria client core.
//!
//! # Design
//! The core never touches the network; `Host` is the piece that does. It
//! executes every `HttpRequest` the gateway or the item list view hands out,
//! feeds the response back, and turns `ViewEffect`s into terminal output.
//! A navigation effect ends the command, since there is no page to go to.
//!
//! Requests a command does not need are dropped without being sent.

pub mod render;
pub mod transport;

use anyhow::{bail, Context};
use groceteria_core::{
    CategoryFilter, Credentials, GroceteriaClient, ItemListView, ItemPage, KeyValueStore, Route,
    Session, ViewEffect,
};

use crate::transport::Transport;

pub struct Host<S> {
    client: GroceteriaClient,
    transport: Transport,
    session: Session<S>,
    page_size: u32,
}

impl<S: KeyValueStore> Host<S> {
    pub fn new(client: GroceteriaClient, session: Session<S>, page_size: u32) -> Self {
        Self {
            client,
            transport: Transport::new(),
            session,
            page_size,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn requests_sent(&self) -> u64 {
        self.transport.sent()
    }

    /// Sign in and remember the user id as the session token.
    pub fn login(&mut self, email: &str, password: &str, admin: bool) -> anyhow::Result<String> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let user = if admin {
            let req = self.client.build_admin_sign_in(&credentials)?;
            self.client.parse_admin_sign_in(self.transport.execute(req)?)?
        } else {
            let req = self.client.build_user_sign_in(&credentials)?;
            self.client.parse_user_sign_in(self.transport.execute(req)?)?
        };

        let token = user
            .user_id
            .context("login response carried no user id")?
            .to_string();
        let name = user.display_name();
        if admin {
            self.session.store_admin_authorization(&token)?;
            self.session.store_admin_name(&name)?;
        } else {
            self.session.store_user_authorization(&token)?;
            self.session.store_user_name(&name)?;
        }
        if let Some(role) = &user.role {
            self.session.store_user_role(role)?;
        }
        tracing::info!(user_id = %token, admin, "signed in");
        Ok(format!("signed in as {name}\n"))
    }

    pub fn logout(&mut self, admin: bool) -> anyhow::Result<String> {
        let route = if admin {
            self.session.admin_logout()?
        } else {
            self.session.user_logout()?
        };
        Ok(format!("signed out, back to {route}\n"))
    }

    pub fn whoami(&self) -> String {
        let mut out = String::new();
        match (self.session.admin_name(), self.session.admin_authorization()) {
            (Some(name), Some(token)) => out.push_str(&format!("admin: {name} (id {token})\n")),
            _ => out.push_str("admin: not signed in\n"),
        }
        match (self.session.user_name(), self.session.user_authorization()) {
            (Some(name), Some(token)) => out.push_str(&format!("customer: {name} (id {token})\n")),
            _ => out.push_str("customer: not signed in\n"),
        }
        out
    }

    /// The admin item list for `filter`. `page` is one-based and only
    /// matters for a category filter.
    pub fn item_list(&self, filter: CategoryFilter, page: Option<u32>) -> anyhow::Result<String> {
        let view = self.open_view(filter, page)?;
        Ok(render::item_list(&view))
    }

    /// Delete through the view: alert, then the refreshed list.
    pub fn delete_item(&self, item_id: u64, filter: CategoryFilter) -> anyhow::Result<String> {
        let mut view = self.open_view(filter, None)?;
        let mut out = String::new();
        let effects = match view.delete_item(item_id) {
            ViewEffect::Fetch(req) => view.apply_delete_response(self.transport.execute(req)?)?,
            other => bail!("unexpected effect {other:?}"),
        };
        for effect in effects {
            match effect {
                ViewEffect::Alert(message) => {
                    out.push_str(&message);
                    out.push('\n');
                }
                ViewEffect::Fetch(req) => view.apply_list_response(self.transport.execute(req)?)?,
                ViewEffect::Navigate(route) => bail!("redirected to {route}"),
            }
        }
        out.push_str(&render::item_list(&view));
        Ok(out)
    }

    /// Where the editor for `item_id` lives. Only the item itself is
    /// fetched; the list is not.
    pub fn edit_item(&self, item_id: u64) -> anyhow::Result<String> {
        if let Some(route) = self.session.is_admin_login_present() {
            bail!("admin sign-in required (see {route})");
        }
        let view = ItemListView::with_page_size(self.client.clone(), self.page_size);
        let req = self.client.build_get_item(item_id);
        let item = self.client.parse_get_item(self.transport.execute(req)?)?;
        match view.edit_item(&item) {
            Some(ViewEffect::Navigate(route)) => {
                Ok(format!("edit {} at {route}\n", item.item_name))
            }
            _ => bail!("item {item_id} has no id to edit"),
        }
    }

    pub fn search(&self, keyword: &str, page: u32, size: u32) -> anyhow::Result<String> {
        let req = self
            .client
            .build_search_items(keyword, page.saturating_sub(1), size);
        let out = match self.client.parse_item_page(self.transport.execute(req)?)? {
            ItemPage::Bare(items) => render::items(&items),
            ItemPage::Envelope(envelope) => {
                format!("{}{} matches\n", render::items(&envelope.content), envelope.total())
            }
            ItemPage::Unrecognized(_) => "no results\n".to_string(),
        };
        Ok(out)
    }

    pub fn cart(&self, user_id: Option<u64>) -> anyhow::Result<String> {
        let req = match user_id {
            Some(id) => self.client.build_list_cart_for_user(id),
            None => self.client.build_list_cart(),
        };
        let lines = self.client.parse_list_cart(self.transport.execute(req)?)?;
        Ok(render::cart(&lines))
    }

    pub fn orders(&self, user_id: Option<u64>) -> anyhow::Result<String> {
        let req = match user_id {
            Some(id) => self.client.build_list_orders_for_user(id),
            None => self.client.build_list_orders(),
        };
        let orders = self.client.parse_list_orders(self.transport.execute(req)?)?;
        Ok(render::orders(&orders))
    }

    /// Open the view and bring it to `filter`/`page`, executing only the
    /// fetch that produces the final state.
    fn open_view(&self, filter: CategoryFilter, page: Option<u32>) -> anyhow::Result<ItemListView> {
        let mut view = ItemListView::with_page_size(self.client.clone(), self.page_size);
        let mut pending = None;
        for effect in view.open(&self.session) {
            match effect {
                ViewEffect::Navigate(Route::AdminLogin) => {
                    bail!("admin sign-in required (see {})", Route::AdminLogin)
                }
                other => pending = Some(other),
            }
        }
        if filter != CategoryFilter::All {
            pending = Some(view.select_category(filter));
        }
        if let Some(page) = page.filter(|p| *p > 1) {
            pending = Some(view.next_page(page));
        }
        if let Some(ViewEffect::Fetch(req)) = pending {
            view.apply_list_response(self.transport.execute(req)?)?;
        }
        Ok(view)
    }
}
