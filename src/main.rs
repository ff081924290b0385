// src/main.rs
mod binding;
mod components;
mod error;
mod focus_trap;
mod gallery;
mod overlay;
mod pointer;
mod utils;
mod view_state;
mod widget;
mod zoom_config;

use components::zoomable_image::ZoomableImage;
use gallery::GalleryItem;
use yew::prelude::*;

pub enum AppMsg {
    ToggleItem(usize),
    ShowAll,
}

pub struct App {
    items: Vec<GalleryItem>,
    visible: Vec<bool>,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let items = gallery::demo_items();
        let visible = vec![true; items.len()];
        Self { items, visible }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::ToggleItem(index) => {
                if let Some(shown) = self.visible.get_mut(index) {
                    *shown = !*shown;
                    log::info!(
                        "{} gallery item {}",
                        if *shown { "Mounted" } else { "Unmounted" },
                        index
                    );
                    true
                } else {
                    false
                }
            }
            AppMsg::ShowAll => {
                self.visible.iter_mut().for_each(|shown| *shown = true);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let show_all = ctx.link().callback(|_| AppMsg::ShowAll);

        html! {
            <div class="app-container">
                <header class="app-header">
                    <h1>{"Zoomable images"}</h1>
                    <p class="subtitle">{"Click a picture to open it fullscreen, drag to pan, Escape to close"}</p>
                </header>

                <main class="app-main">
                    <div class="gallery-toolbar">
                        <button onclick={show_all}>{"Show all"}</button>
                    </div>

                    <div class="gallery">
                        {for self.items.iter().enumerate().map(|(index, item)| {
                            let toggle = ctx.link().callback(move |_| AppMsg::ToggleItem(index));
                            let shown = self.visible[index];
                            html! {
                                <figure class="gallery-item">
                                    if shown {
                                        <ZoomableImage
                                            src={item.src.clone()}
                                            alt={item.alt.clone()}
                                        />
                                    } else {
                                        <div class="gallery-placeholder">{"Removed"}</div>
                                    }
                                    <figcaption>
                                        <span>{item.label().to_string()}</span>
                                        <button onclick={toggle}>
                                            {if shown { "Remove" } else { "Restore" }}
                                        </button>
                                    </figcaption>
                                </figure>
                            }
                        })}
                    </div>
                </main>

                <footer class="app-footer">
                    <p>{"zoomable © 2026"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());

    // Static markup outside the app is bound before Yew mounts its own images
    let body = gloo::utils::body();
    binding::bind_marked(&body)
        .into_iter()
        .for_each(binding::Binding::forget);

    let root = gloo::utils::document()
        .get_element_by_id("app")
        .unwrap_or_else(|| body.into());
    yew::Renderer::<App>::with_root(root).render();
}
