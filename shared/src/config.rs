pub struct Config {
    pub namespace: String,
    pub data_dir: String,
}

impl Config {
    const DEFAULT_NAMESPACE: &str = "@GoStore";
    const DEFAULT_DATA_DIR: &str = "./data";

    pub fn from_env() -> Self {
        Self {
            namespace: std::env::var("GOSTORE_NAMESPACE")
                .unwrap_or_else(|_| Self::DEFAULT_NAMESPACE.to_string()),
            data_dir: std::env::var("GOSTORE_DATA_DIR")
                .unwrap_or_else(|_| Self::DEFAULT_DATA_DIR.to_string()),
        }
    }

    /// Storage key the persisted cart record lives under.
    pub fn cart_key(&self) -> String {
        format!("{}:cart", self.namespace)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: Self::DEFAULT_NAMESPACE.to_string(),
            data_dir: Self::DEFAULT_DATA_DIR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cart_key_matches_legacy_namespace() {
        // existing installs have their cart persisted under this exact key
        assert_eq!(Config::default().cart_key(), "@GoStore:cart");
    }
}
