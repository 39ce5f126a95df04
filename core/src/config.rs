
#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct Config {
	#[serde(default)]
	pub instance: InstanceConfig,

	#[serde(default)]
	pub datasource: DatasourceConfig,

	#[serde(default)]
	pub ledger: LedgerConfig,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct InstanceConfig {
	#[serde_inline_default("depot".into())]
	pub name: String,

	#[serde_inline_default("equipment, suppliers and partner ownership".into())]
	pub description: String,

	#[serde(default)]
	pub contact: Option<String>,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct DatasourceConfig {
	#[serde_inline_default("postgres://depot@localhost/depot".into())]
	pub connection_string: String,

	#[serde_inline_default(32)]
	pub max_connections: u32,

	#[serde_inline_default(1)]
	pub min_connections: u32,

	#[serde_inline_default(90u64)]
	pub connect_timeout_seconds: u64,

	#[serde_inline_default(30u64)]
	pub acquire_timeout_seconds: u64,

	#[serde_inline_default(10u64)]
	pub slow_query_warn_seconds: u64,

	#[serde_inline_default(true)]
	pub slow_query_warn_enable: bool,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct LedgerConfig {
	/// keep fetched ledgers in memory until a mutation marks them stale
	#[serde_inline_default(true)]
	pub cache: bool,

	/// refuse to show a negative company share instead of just logging it
	#[serde(default)]
	pub strict_company_share: bool,

	#[serde_inline_default(20)]
	pub default_page_size: u64,

	#[serde_inline_default(100)]
	pub max_page_size: u64,
}

impl Config {
	pub fn load(path: Option<&std::path::PathBuf>) -> Self {
		let Some(cfg_path) = path else { return Config::default() };
		match std::fs::read_to_string(cfg_path) {
			Ok(x) => match toml::from_str(&x) {
				Ok(cfg) => return cfg,
				Err(e) => tracing::error!("failed parsing config file: {e}"),
			},
			Err(e) => tracing::error!("failed reading config file: {e}"),
		}
		Config::default()
	}

	pub fn page_size(&self, requested: Option<u64>) -> u64 {
		requested
			.unwrap_or(self.ledger.default_page_size)
			.clamp(1, self.ledger.max_page_size)
	}
}

#[cfg(test)]
mod test {
	use super::Config;

	#[test]
	fn partial_config_keeps_defaults_for_missing_fields() {
		let cfg : Config = toml::from_str(r#"
			[datasource]
			connection_string = "sqlite://./depot.db"

			[ledger]
			cache = false
		"#).unwrap();

		assert_eq!(cfg.datasource.connection_string, "sqlite://./depot.db");
		assert_eq!(cfg.datasource.max_connections, 32);
		assert!(!cfg.ledger.cache);
		assert_eq!(cfg.ledger.default_page_size, 20);
		assert_eq!(cfg.instance.name, "depot");
	}

	#[test]
	fn page_size_is_bounded() {
		let cfg = Config::default();
		assert_eq!(cfg.page_size(None), 20);
		assert_eq!(cfg.page_size(Some(0)), 1);
		assert_eq!(cfg.page_size(Some(5000)), 100);
	}
}
