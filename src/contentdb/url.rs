//! Catalog URL construction.
//!
//! Path components are percent-encoded one by one and then resolved against
//! the base address with RFC 3986 reference resolution. Encoding keeps ASCII
//! letters, digits, `_ . - ~` and `/`; everything else becomes `%XX`. Since
//! `/` survives, `"api/packages"` stays two segments and a component starting
//! with `/` replaces the base path entirely.

use reqwest::Url;

use crate::error::{Error, Result};

pub fn encode_component(component: &str) -> String {
    component
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

pub fn join(base: &Url, components: &[&str]) -> Result<Url> {
    let relative = components
        .iter()
        .map(|c| encode_component(c))
        .collect::<Vec<_>>()
        .join("/");

    base.join(&relative).map_err(|e| Error::InvalidUrl {
        url: format!("{} + {}", base, relative),
        reason: e.to_string(),
    })
}

pub fn parse_base(base_address: &str) -> Result<Url> {
    let invalid = |reason: String| Error::InvalidUrl {
        url: base_address.to_string(),
        reason,
    };

    let url = Url::parse(base_address).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}
