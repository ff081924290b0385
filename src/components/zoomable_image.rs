// src/components/zoomable_image.rs
use crate::binding::bind;
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ZoomableImageProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub alt: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// An `<img>` bound to the fullscreen overlay while it is mounted.
#[function_component(ZoomableImage)]
pub fn zoomable_image(props: &ZoomableImageProps) -> Html {
    let image_ref = use_node_ref();

    {
        let image_ref = image_ref.clone();
        use_effect_with((), move |_| {
            let binding = image_ref
                .cast::<Element>()
                .and_then(|element| bind(&element).ok());

            // Unbind on unmount
            move || {
                if let Some(binding) = binding {
                    binding.unbind();
                }
            }
        });
    }

    html! {
        <img
            ref={image_ref}
            src={props.src.clone()}
            alt={props.alt.clone()}
            class={classes!("zoomable-thumbnail", props.class.clone())}
            loading="lazy"
        />
    }
}
