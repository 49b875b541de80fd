//! Browser glue: reads the world out of the page, forwards input into the
//! [`Session`] and writes each [`Tick`] back to the DOM.
//!
//! Expected markup (ids): `game-area`, `character`, `message`, `sign-message`,
//! `popup`, `popup-content`, `close-popup`, `overlay`, plus optional on-screen
//! buttons `left`, `right`, `up`, `down` and `f-key`. Regions are any elements
//! with class `wall`, `door` (`data-link`) or `sign` (`data-content`), read in
//! document order.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent,
    window,
};

use crate::config::Config;
use crate::geometry::{Rect, Viewport};
use crate::input::{Command, Direction, INTERACT_BUTTON_ID, KeyAction, key_action};
use crate::session::{Effect, Messages, Session, Tick};
use crate::world::{Region, RegionKind, World};

const HIDDEN: &str = "hidden";
const PRESSED: &str = "pressed";
const CLICK_PRESS_MS: i32 = 100;

/// Everything the frame loop needs, kept alive for the page lifetime.
struct Page {
    session: Session,
    world: World,
    game_area: Element,
    character: HtmlElement,
    door_message: Element,
    sign_message: Element,
    popup: Element,
    popup_content: Element,
    overlay: Element,
}

thread_local! {
    static PAGE: std::cell::RefCell<Option<Page>> = const { std::cell::RefCell::new(None) };
}

fn with_page<R>(f: impl FnOnce(&mut Page) -> R) -> Option<R> {
    PAGE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub fn start(config: Config) -> Result<(), JsValue> {
    if PAGE.with(|cell| cell.borrow().is_some()) {
        console_warn!("door-walk: already running, ignoring second start");
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let game_area = element(&doc, "game-area")?;
    let character: HtmlElement = element(&doc, "character")?.dyn_into()?;
    let world = scan_world(&doc, &game_area)?;
    console_log!(
        "door-walk: {} walls, {} doors, {} signs",
        world.walls.len(),
        world.doors.len(),
        world.signs.len()
    );

    let session = Session::new(config).with_actor_size(
        character.offset_width() as f64,
        character.offset_height() as f64,
    );
    let page = Page {
        session,
        world,
        game_area,
        character,
        door_message: element(&doc, "message")?,
        sign_message: element(&doc, "sign-message")?,
        popup: element(&doc, "popup")?,
        popup_content: element(&doc, "popup-content")?,
        overlay: element(&doc, "overlay")?,
    };
    PAGE.with(|cell| cell.replace(Some(page)));

    install_keyboard(&doc)?;
    install_buttons(&doc)?;

    let close = element(&doc, "close-popup")?;
    on(&close, "click", |_| {
        with_page(|p| p.session.queue(Command::ClosePopup));
    })?;

    // Layout moves with the window; region rects are re-read on resize.
    on(&win, "resize", |_| {
        let Some(doc) = window().and_then(|w| w.document()) else {
            return;
        };
        with_page(|p| match scan_world(&doc, &p.game_area) {
            Ok(world) => p.world = world,
            Err(e) => console_warn!("door-walk: rescan failed: {:?}", e),
        });
    })?;

    start_loop();
    Ok(())
}

fn element(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

/// Region rects relative to the game area's top-left corner.
fn scan_world(doc: &Document, game_area: &Element) -> Result<World, JsValue> {
    let origin = game_area.get_bounding_client_rect();
    let mut world = World::new();
    for (selector, kind) in [
        (".wall", RegionKind::Wall),
        (".door", RegionKind::Door),
        (".sign", RegionKind::Sign),
    ] {
        let nodes = doc.query_selector_all(selector)?;
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let r = el.get_bounding_client_rect();
            let rect = Rect::new(
                r.left() - origin.left(),
                r.top() - origin.top(),
                r.width(),
                r.height(),
            );
            world.push(match kind {
                RegionKind::Wall => Region::wall(rect),
                RegionKind::Door => Region::door(rect, el.get_attribute("data-link").as_deref()),
                RegionKind::Sign => Region::sign(rect, el.get_attribute("data-content").as_deref()),
            });
        }
    }
    Ok(world)
}

// --- Input -------------------------------------------------------------------

fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_keyboard(doc: &Document) -> Result<(), JsValue> {
    on(doc, "keydown", |evt| {
        let Some(evt) = evt.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        match key_action(&evt.key()) {
            Some(KeyAction::Move(dir)) => press(dir),
            Some(KeyAction::Interact) => {
                if interact_now() {
                    pulse_pressed(INTERACT_BUTTON_ID);
                }
            }
            None => {}
        }
    })?;
    on(doc, "keyup", |evt| {
        let Some(evt) = evt.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(KeyAction::Move(dir)) = key_action(&evt.key()) {
            release(dir);
        }
    })
}

fn install_buttons(doc: &Document) -> Result<(), JsValue> {
    for dir in Direction::ALL {
        let Some(btn) = doc.get_element_by_id(dir.button_id()) else {
            continue;
        };
        on(&btn, "mousedown", move |_| press(dir))?;
        on(&btn, "mouseup", move |_| release(dir))?;
        on(&btn, "mouseleave", move |_| release(dir))?;
        on(&btn, "touchend", move |_| release(dir))?;

        // Non-passive so the page does not scroll or zoom under the thumb.
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        let closure = Closure::wrap(Box::new(move |evt: Event| {
            evt.prevent_default();
            press(dir);
        }) as Box<dyn FnMut(Event)>);
        btn.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;
        closure.forget();
    }

    if let Some(btn) = doc.get_element_by_id(INTERACT_BUTTON_ID) {
        on(&btn, "click", |_| {
            pulse_pressed(INTERACT_BUTTON_ID);
            interact_now();
        })?;
    }
    Ok(())
}

/// Resolve an interact inside the input handler itself. `window.open` has to
/// run within the user gesture or popup blockers reject it, so this does not
/// go through the frame queue. Returns true if a door or sign was in reach.
fn interact_now() -> bool {
    let Some(win) = window() else {
        return false;
    };
    with_page(|p| {
        let in_reach = !p.session.is_popup_open()
            && (p.session.touching_door() || p.session.touching_sign());
        if let Some(effect) = p.session.interact(&p.world) {
            let applied = p
                .apply(&win, &effect)
                .and_then(|_| p.show_messages(p.session.messages()));
            if let Err(e) = applied {
                console_warn!("door-walk: interact failed: {:?}", e);
            }
        }
        in_reach
    })
    .unwrap_or(false)
}

fn press(dir: Direction) {
    if with_page(|p| p.session.press(dir)).unwrap_or(false) {
        set_pressed(dir.button_id(), true);
    }
}

fn release(dir: Direction) {
    if with_page(|p| p.session.release(dir)).unwrap_or(false) {
        set_pressed(dir.button_id(), false);
    }
}

fn set_pressed(id: &str, pressed: bool) {
    let Some(btn) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };
    if let Err(e) = btn.class_list().toggle_with_force(PRESSED, pressed) {
        console_warn!("door-walk: press effect on #{id} failed: {:?}", e);
    }
}

fn pulse_pressed(id: &'static str) {
    set_pressed(id, true);
    let Some(win) = window() else {
        return;
    };
    let undo = Closure::once_into_js(move || set_pressed(id, false));
    if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        undo.unchecked_ref(),
        CLICK_PRESS_MS,
    ) {
        console_warn!("door-walk: press effect timer failed: {:?}", e);
        set_pressed(id, false);
    }
}

// --- Frame loop --------------------------------------------------------------

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        if let Some(Err(e)) = with_page(frame) {
            console_warn!("door-walk: frame failed: {:?}", e);
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn frame(page: &mut Page) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let viewport = Viewport::new(
        win.inner_width()?.as_f64().unwrap_or(0.0),
        win.inner_height()?.as_f64().unwrap_or(0.0),
    );
    page.session.set_actor_size(
        page.character.offset_width() as f64,
        page.character.offset_height() as f64,
    );
    let tick = page.session.tick(&page.world, viewport);
    for effect in &tick.effects {
        page.apply(&win, effect)?;
    }
    if !tick.frozen {
        page.render(&tick)?;
    }
    Ok(())
}

impl Page {
    fn apply(&self, win: &web_sys::Window, effect: &Effect) -> Result<(), JsValue> {
        match effect {
            Effect::OpenLink(url) => {
                console_log!("door-walk: opening {url}");
                if win.open_with_url_and_target(url, "_blank")?.is_none() {
                    console_warn!("door-walk: popup blocked for {url}");
                }
            }
            Effect::ShowPopup(text) => {
                self.popup_content.set_text_content(Some(text.as_str()));
                set_hidden(&self.popup, false)?;
                set_hidden(&self.overlay, false)?;
            }
            Effect::HidePopup => {
                set_hidden(&self.popup, true)?;
                set_hidden(&self.overlay, true)?;
            }
        }
        Ok(())
    }

    fn show_messages(&self, messages: Messages) -> Result<(), JsValue> {
        set_hidden(&self.door_message, !messages.door)?;
        set_hidden(&self.sign_message, !messages.sign)
    }

    fn render(&self, tick: &Tick) -> Result<(), JsValue> {
        self.show_messages(tick.messages)?;
        let style = self.character.style();
        style.set_property("left", &format!("{}px", tick.x))?;
        style.set_property("top", &format!("{}px", tick.y))?;
        Ok(())
    }
}

fn set_hidden(el: &Element, hidden: bool) -> Result<(), JsValue> {
    el.class_list().toggle_with_force(HIDDEN, hidden)?;
    Ok(())
}
