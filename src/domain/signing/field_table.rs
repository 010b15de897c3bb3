//! Mode-dependent field tables.
//!
//! Single source of truth for which pingback fields are required, which
//! fields a v1 pingback signature covers, and which signature version each
//! direction defaults to.

use crate::domain::foundation::ApiMode;

use super::version::SignatureVersion;

/// Field layout and version defaults for one API mode.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldTable {
    /// Keys a pingback must carry to pass the structural gate.
    pub required_pingback_fields: &'static [&'static str],

    /// Keys covered by a v1 pingback signature, in signing order.
    pub v1_signed_fields: &'static [&'static str],

    /// Version used for widgets unless the caller overrides it.
    pub default_widget_version: SignatureVersion,

    /// Version used for pingbacks that carry no `sign_version`.
    pub default_pingback_version: SignatureVersion,
}

static VIRTUAL_CURRENCY: FieldTable = FieldTable {
    required_pingback_fields: &["uid", "currency", "type", "ref", "sig"],
    v1_signed_fields: &["uid", "currency", "type", "ref"],
    default_widget_version: SignatureVersion::V3,
    default_pingback_version: SignatureVersion::V1,
};

static DIGITAL_GOODS: FieldTable = FieldTable {
    required_pingback_fields: &["uid", "goodsid", "type", "ref", "sig"],
    v1_signed_fields: &["uid", "goodsid", "slength", "speriod", "type", "ref"],
    default_widget_version: SignatureVersion::V3,
    default_pingback_version: SignatureVersion::V1,
};

static CART: FieldTable = FieldTable {
    required_pingback_fields: &["uid", "goodsid", "type", "ref", "sig"],
    v1_signed_fields: &["uid", "goodsid", "type", "ref"],
    default_widget_version: SignatureVersion::V2,
    default_pingback_version: SignatureVersion::V2,
};

impl FieldTable {
    /// Returns the table for `mode`.
    pub fn for_mode(mode: ApiMode) -> &'static FieldTable {
        match mode {
            ApiMode::VirtualCurrency => &VIRTUAL_CURRENCY,
            ApiMode::DigitalGoods => &DIGITAL_GOODS,
            ApiMode::Cart => &CART,
        }
    }

    /// Returns the subset of fields a pingback signature covers.
    ///
    /// `None` means every parameter except `sig` is signed.
    pub fn pingback_signed_fields(
        &self,
        version: SignatureVersion,
    ) -> Option<&'static [&'static str]> {
        match version {
            SignatureVersion::V1 => Some(self.v1_signed_fields),
            SignatureVersion::V2 | SignatureVersion::V3 => None,
        }
    }
}
