//! Node kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

macro_rules! tags {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// The kind of element a node describes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum Tag {
            $($variant,)*
        }

        impl Tag {
            /// Every known tag, in declaration order.
            pub const ALL: &'static [Tag] = &[$(Tag::$variant,)*];

            /// The lowercase element name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Tag::$variant => $name,)*
                }
            }
        }

        impl FromStr for Tag {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Tag::$variant),)*
                    other => Err(Error::UnknownTag(other.to_string())),
                }
            }
        }
    };
}

tags! {
    A => "a",
    Article => "article",
    Body => "body",
    Button => "button",
    Div => "div",
    Footer => "footer",
    Form => "form",
    H1 => "h1",
    H2 => "h2",
    H3 => "h3",
    Header => "header",
    Img => "img",
    Input => "input",
    Label => "label",
    Li => "li",
    Main => "main",
    Nav => "nav",
    Ol => "ol",
    Option => "option",
    P => "p",
    Section => "section",
    Select => "select",
    Span => "span",
    Table => "table",
    Td => "td",
    Textarea => "textarea",
    Th => "th",
    Tr => "tr",
    Ul => "ul",
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
