//! Network link boundary

use crate::error::LinkError;

/// Addressing the link was given, for status reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkIdentity {
    pub ip: String,
    pub gateway: String,
    pub netmask: String,
    pub dns: String,
}

impl LinkIdentity {
    /// One-line description pushed to the control plane.
    pub fn describe(&self) -> String {
        format!(
            "IP: {}|G: {}|S: {}|DNS: {}",
            self.ip, self.gateway, self.netmask, self.dns
        )
    }
}

/// Radio/network link driver.
///
/// A single `connect` call is one association attempt; retry policy lives
/// in [`crate::Connectivity`], not here.
#[allow(async_fn_in_trait)]
pub trait NetworkLink {
    async fn connect(&mut self, ssid: &str, secret: &str) -> Result<(), LinkError>;

    fn is_up(&self) -> bool;

    /// Signal strength in dBm, meaningful only while the link is up.
    fn rssi(&self) -> i32;

    fn identity(&self) -> LinkIdentity;

    /// Tear the link down. Must be safe to call when already down.
    async fn disconnect(&mut self);
}
