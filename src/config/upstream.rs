// Upstream table module
// The two price endpoints proxied to the browser. Compiled in, never reloaded.

pub const PHUQUY_PREFIX: &str = "/api/phuquy";
pub const PHUQUY_URL: &str =
    "https://be.phuquy.com.vn/jewelry/product-payment-service/api/products/get-price";

pub const BTMC_PREFIX: &str = "/api/btmc";
pub const BTMC_URL: &str =
    "http://api.btmc.vn/api/BTMCAPI/getpricebtmc?key=3kd8ub1llcg9t45hnoh8hmn7t5kc2v";

/// A path prefix bound to one upstream URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub name: &'static str,
    pub prefix: String,
    pub url: String,
}

/// Ordered prefix table, first match wins
#[derive(Debug, Clone)]
pub struct UpstreamTable {
    targets: Vec<UpstreamTarget>,
}

impl UpstreamTable {
    /// The Phu Quy and BTMC endpoints
    pub fn fixed() -> Self {
        Self::new(vec![
            UpstreamTarget {
                name: "phuquy",
                prefix: PHUQUY_PREFIX.to_string(),
                url: PHUQUY_URL.to_string(),
            },
            UpstreamTarget {
                name: "btmc",
                prefix: BTMC_PREFIX.to_string(),
                url: BTMC_URL.to_string(),
            },
        ])
    }

    pub const fn new(targets: Vec<UpstreamTarget>) -> Self {
        Self { targets }
    }

    /// Find the upstream whose prefix the path starts with
    pub fn resolve(&self, path: &str) -> Option<&UpstreamTarget> {
        self.targets.iter().find(|t| path.starts_with(t.prefix.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpstreamTarget> {
        self.targets.iter()
    }
}
