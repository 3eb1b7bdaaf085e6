//! Tag atoms. Each returns an empty [`Element`] of that type.

use crate::{dom::Dom, fragment::Element};

macro_rules! tags {
    ($($tag:ident),* $(,)?) => {
        $(
            pub fn $tag<D: Dom>() -> Element<D> {
                Element::new(stringify!($tag))
            }
        )*
    };
}

tags!(
    a, article, aside, button, div, footer, form, h1, h2, h3, header, img, input, label, li, main,
    nav, ol, p, section, span, ul,
);
