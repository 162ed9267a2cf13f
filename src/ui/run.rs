use crate::model::User;
use crate::store::{MemoryStore, SharedStore, Store};
use crate::ui::model::initial_model;
use crate::ui::{Effect, Msg, Op};
use bubbletea_rs::{
    Program, command::Cmd, event::KeyMsg, event::WindowSizeMsg, model::Model as TeaModel,
};
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::OnceCell;
use std::sync::Arc;

// The program adapter is constructed statically by bubbletea-rs, so the store
// is handed over through a process-wide cell before the program starts.
static STORE: OnceCell<SharedStore> = OnceCell::new();

fn shared_store() -> SharedStore {
    STORE
        .get_or_init(|| match MemoryStore::demo() {
            Ok(s) => Arc::new(s),
            Err(_) => Arc::new(MemoryStore::new(
                User {
                    id: String::new(),
                    name: String::new(),
                    about: String::new(),
                    avatar: String::new(),
                },
                vec![],
            )),
        })
        .clone()
}

// Store resolutions travel back into update as wrapped ui messages.
struct AppMsg(Msg);

fn deliver(msg: Msg) -> Option<bubbletea_rs::event::Msg> {
    Some(Box::new(AppMsg(msg)) as bubbletea_rs::event::Msg)
}

// Map a requested effect onto an async store command. Each command resolves
// with exactly one message, success or failure; arrival order across
// different in-flight commands is whatever the futures decide.
fn dispatch(store: SharedStore, effect: Effect) -> Cmd {
    Box::pin(async move {
        let msg = match effect {
            Effect::LoadAll => match store.fetch_current_user().await {
                Ok(user) => match store.fetch_cards().await {
                    Ok(cards) => Msg::Loaded { user, cards },
                    Err(e) => Msg::LoadFailed(e),
                },
                Err(e) => Msg::LoadFailed(e),
            },
            Effect::SaveProfile { name, about } => match store.update_profile(name, about).await {
                Ok(user) => Msg::ProfileSaved(user),
                Err(err) => Msg::OpFailed {
                    op: Op::SaveProfile,
                    err,
                },
            },
            Effect::SaveAvatar { url } => match store.update_avatar(url).await {
                Ok(user) => Msg::AvatarSaved(user),
                Err(err) => Msg::OpFailed {
                    op: Op::SaveAvatar,
                    err,
                },
            },
            Effect::CreateCard { name, link } => match store.create_card(name, link).await {
                Ok(card) => Msg::CardCreated(card),
                Err(err) => Msg::OpFailed {
                    op: Op::CreateCard,
                    err,
                },
            },
            Effect::DeleteCard { id } => match store.delete_card(id.clone()).await {
                Ok(()) => Msg::CardDeleted { id },
                Err(err) => Msg::OpFailed {
                    op: Op::DeleteCard,
                    err,
                },
            },
            Effect::SetLike { id, already_liked } => {
                match store.set_like(id.clone(), already_liked).await {
                    Ok(card) => Msg::LikeSettled { id, card },
                    Err(err) => Msg::OpFailed {
                        op: Op::SetLike,
                        err,
                    },
                }
            }
        };
        deliver(msg)
    })
}

struct TeaAdapter {
    inner: crate::ui::Model,
}

impl TeaAdapter {
    fn apply(&mut self, msg: Msg) -> Option<Cmd> {
        self.inner
            .update(msg)
            .map(|effect| dispatch(shared_store(), effect))
    }
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        let mut adapter = TeaAdapter {
            inner: initial_model(),
        };
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        adapter.inner.update(Msg::WindowSize {
            width: width as usize,
            height: height as usize,
        });
        // kick off the initial load; the board stays empty until it settles
        let load = dispatch(shared_store(), Effect::LoadAll);
        (adapter, Some(load))
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            match &km.key {
                KeyCode::Esc => {
                    // Quit from browse mode; with a dialog open Esc dismisses it
                    if self.inner.dialog.is_none() {
                        return Some(bubbletea_rs::quit());
                    }
                    return self.apply(Msg::KeyEsc);
                }
                KeyCode::Enter => return self.apply(Msg::KeyEnter),
                KeyCode::Backspace => return self.apply(Msg::KeyBackspace),
                KeyCode::Tab => return self.apply(Msg::KeyTab),
                KeyCode::Up => return self.apply(Msg::KeyUp),
                KeyCode::Down => return self.apply(Msg::KeyDown),
                KeyCode::Char(ch) => {
                    if *ch == '\u{03}' {
                        // Ctrl-C delivered as ETX
                        return Some(bubbletea_rs::quit());
                    }
                    if km.modifiers.contains(KeyModifiers::CONTROL) {
                        return match ch {
                            'c' | 'C' => Some(bubbletea_rs::quit()),
                            'n' | 'N' => self.apply(Msg::KeyDown),
                            'p' | 'P' => self.apply(Msg::KeyUp),
                            _ => None,
                        };
                    }
                    return self.apply(Msg::Rune(*ch));
                }
                _ => { /* ignore other keys */ }
            }
            return None;
        }
        if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            return self.apply(Msg::WindowSize {
                width: ws.width as usize,
                height: ws.height as usize,
            });
        }
        if let Some(app) = msg.downcast_ref::<AppMsg>() {
            return self.apply(app.0.clone());
        }
        None
    }

    fn view(&self) -> String {
        self.inner.render_full()
    }
}

pub async fn run(store: SharedStore) -> Result<(), String> {
    // the first caller wins; later runs in the same process reuse the store
    let _ = STORE.set(store);
    let builder = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true);
    let program = builder
        .build()
        .map_err(|e| format!("failed to build program: {e:?}"))?;
    program
        .run()
        .await
        .map_err(|e| format!("program error: {e:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn me() -> User {
        User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            about: String::new(),
            avatar: String::new(),
        }
    }

    #[test]
    fn test_dispatch_load_all_resolves_with_loaded() {
        let store: SharedStore = Arc::new(MemoryStore::demo().expect("seed parses"));
        let out = block_on(dispatch(store, Effect::LoadAll)).expect("one message");
        let app = out.downcast_ref::<AppMsg>().expect("wrapped ui message");
        match &app.0 {
            Msg::Loaded { user, cards } => {
                assert!(!user.id.is_empty());
                assert!(!cards.is_empty());
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_failure_maps_to_op_failed() {
        let store: SharedStore = Arc::new(MemoryStore::new(me(), vec![]));
        let out = block_on(dispatch(
            store,
            Effect::DeleteCard {
                id: "zz".to_string(),
            },
        ))
        .expect("one message");
        let app = out.downcast_ref::<AppMsg>().expect("wrapped ui message");
        match &app.0 {
            Msg::OpFailed { op, err } => {
                assert_eq!(*op, Op::DeleteCard);
                assert!(err.contains("no card"));
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_like_carries_card_id() {
        let store: SharedStore = Arc::new(MemoryStore::demo().expect("seed parses"));
        let cards = block_on(store.fetch_cards()).unwrap();
        let id = cards[0].id.clone();
        let out = block_on(dispatch(
            store,
            Effect::SetLike {
                id: id.clone(),
                already_liked: false,
            },
        ))
        .expect("one message");
        let app = out.downcast_ref::<AppMsg>().expect("wrapped ui message");
        match &app.0 {
            Msg::LikeSettled { id: got, card } => {
                assert_eq!(*got, id);
                assert_eq!(card.id, id);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }
}
