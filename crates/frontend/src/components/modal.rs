//! Modal dialog shell.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub open: bool,
    pub on_close: Callback<MouseEvent>,
    pub children: Children,
}

/// Overlay dialog; renders nothing while closed.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return Html::default();
    }

    html! {
        <div class="modal">
            <div class="modal-content">
                <div class="modal-header">
                    <h3>{ props.title.clone() }</h3>
                    <button class="modal-close" onclick={props.on_close.clone()}>
                        { "\u{00d7}" }
                    </button>
                </div>
                { props.children.clone() }
            </div>
        </div>
    }
}
