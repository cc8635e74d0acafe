// Theme toggle, mobile nav drawer and frosted nav bar.

use crate::constants::*;
use crate::dom::{self, js_err, EventListener};
use portfolio_core::{NavDrawer, PreferenceStore, ScrollGlass, StoreError, Theme, ThemePreference};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `window.localStorage`, if the browser lets us have it.
pub struct LocalStorage {
    storage: Option<web::Storage>,
}

impl LocalStorage {
    pub fn open(window: &web::Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&web::Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}

fn apply_theme(root: &web::Element, toggle: Option<&web::Element>, theme: Theme) {
    if let Some(class) = Theme::Dark.root_class() {
        dom::set_class(root, class, theme.is_dark());
    }
    if let Some(btn) = toggle {
        let _ = btn.set_attribute("aria-pressed", if theme.is_dark() { "true" } else { "false" });
    }
}

struct NavElements {
    toggle: Option<web::Element>,
    drawer: Option<web::Element>,
    body: Option<web::HtmlElement>,
}

impl NavElements {
    fn apply(&self, nav: &NavDrawer) {
        let open = nav.is_open();
        if let Some(drawer) = &self.drawer {
            dom::set_class(drawer, CLASS_DRAWER_OPEN, open);
        }
        if let Some(toggle) = &self.toggle {
            let _ = toggle.set_attribute("aria-expanded", if open { "true" } else { "false" });
        }
        if let Some(body) = &self.body {
            dom::set_class(body, CLASS_BODY_LOCKED, open);
        }
    }
}

/// Listener guards for the page chrome; dropping it unwires everything.
pub struct Chrome {
    _listeners: Vec<EventListener>,
}

impl Chrome {
    pub fn mount(window: &web::Window, document: &web::Document) -> anyhow::Result<Self> {
        let mut listeners = Vec::new();
        let root = document
            .document_element()
            .ok_or_else(|| anyhow::anyhow!("no document element"))?;

        // Theme
        let theme_toggle = document.get_element_by_id(THEME_TOGGLE_ID);
        let pref = Rc::new(RefCell::new(ThemePreference::load(
            LocalStorage::open(window),
            dom::match_media(window, DARK_SCHEME_QUERY),
        )));
        apply_theme(&root, theme_toggle.as_ref(), pref.borrow().theme());
        if let Some(btn) = &theme_toggle {
            let (pref, root, btn_c) = (pref.clone(), root.clone(), btn.clone());
            listeners.push(EventListener::new(btn, "click", move |_| {
                let theme = pref.borrow_mut().toggle();
                apply_theme(&root, Some(&btn_c), theme);
                log::debug!("theme -> {}", theme.as_str());
            })?);
        } else {
            log::warn!("missing #{}; theme toggle disabled", THEME_TOGGLE_ID);
        }

        // Nav drawer
        let nav = Rc::new(RefCell::new(NavDrawer::default()));
        let els = Rc::new(NavElements {
            toggle: document.get_element_by_id(NAV_TOGGLE_ID),
            drawer: document.get_element_by_id(NAV_DRAWER_ID),
            body: document.body(),
        });
        els.apply(&nav.borrow());
        let on_nav = |change: fn(&mut NavDrawer) -> bool| {
            let (nav, els) = (nav.clone(), els.clone());
            move |_: web::Event| {
                if change(&mut *nav.borrow_mut()) {
                    els.apply(&nav.borrow());
                }
            }
        };
        if let Some(toggle) = &els.toggle {
            listeners.push(EventListener::new(toggle, "click", on_nav(NavDrawer::toggle))?);
        }
        let links = document
            .query_selector_all(NAV_LINK_SELECTOR)
            .map_err(js_err)?;
        for i in 0..links.length() {
            if let Some(link) = links.get(i) {
                listeners.push(EventListener::new(&link, "click", on_nav(NavDrawer::on_link_click))?);
            }
        }
        listeners.push(EventListener::new(
            window,
            "hashchange",
            on_nav(NavDrawer::on_hash_change),
        )?);
        {
            let (nav, els) = (nav.clone(), els.clone());
            listeners.push(EventListener::new(window, "keydown", move |ev: web::Event| {
                let Some(key) = ev.dyn_ref::<web::KeyboardEvent>().map(|k| k.key()) else {
                    return;
                };
                if nav.borrow_mut().on_key(&key) {
                    els.apply(&nav.borrow());
                }
            })?);
        }
        {
            let (nav, els, win) = (nav.clone(), els.clone(), window.clone());
            listeners.push(EventListener::new(window, "resize", move |_| {
                let Some((w, _)) = dom::viewport_size(&win) else {
                    return;
                };
                if nav.borrow_mut().on_resize(w) {
                    els.apply(&nav.borrow());
                }
            })?);
        }

        // Scroll glass
        match document.get_element_by_id(NAV_ID) {
            Some(bar) => {
                let glass = Rc::new(RefCell::new(ScrollGlass::default()));
                let sync = {
                    let (glass, bar, win) = (glass.clone(), bar.clone(), window.clone());
                    move || {
                        let y = win.scroll_y().unwrap_or(0.0);
                        if glass.borrow_mut().update(y) {
                            dom::set_class(&bar, CLASS_NAV_GLASS, glass.borrow().is_glass());
                        }
                    }
                };
                sync();
                listeners.push(EventListener::new(window, "scroll", move |_| sync())?);
            }
            None => log::warn!("missing #{}; scroll glass disabled", NAV_ID),
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}
