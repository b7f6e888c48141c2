use lease_election::{AcquireOutcome, CoordinationStore, ElectionError, RenewOutcome, Result};
use parking_lot::Mutex;
use redis::{Client, Connection, ConnectionInfo, IntoConnectionInfo, RedisError, Script};
use std::fmt;
use std::time::Duration;

mod scripts;

pub use self::scripts::{ACQUIRE_CREATED_MARKER, ACQUIRE_SCRIPT, RENEW_SCRIPT};

/// Connection settings for the Redis coordination store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedisStoreConfig {
    /// Redis URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Overrides any password in the URL
    pub password: Option<String>,
    /// Overrides the database in the URL
    pub db: Option<i64>,
    pub connection_timeout: Duration,
    /// Read and write timeout of every call
    pub response_timeout: Duration,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        RedisStoreConfig {
            url: "redis://127.0.0.1:6379".to_string(),
            password: None,
            db: None,
            connection_timeout: Duration::from_millis(1000),
            response_timeout: Duration::from_millis(1000),
        }
    }
}

impl RedisStoreConfig {
    /// Endpoint as `host:port`, an empty password meaning none.
    pub fn simple(endpoint: &str, password: &str, db: i64) -> RedisStoreConfig {
        let password = if password.is_empty() {
            None
        } else {
            Some(password.to_string())
        };

        RedisStoreConfig {
            url: format!("redis://{}", endpoint),
            password,
            db: Some(db),
            ..RedisStoreConfig::default()
        }
    }

    fn connection_info(&self) -> Result<ConnectionInfo> {
        let mut info = self.url.as_str().into_connection_info().map_err(|err| {
            ElectionError::misconfigured(format!("Invalid Redis URL: {}", self.url), err.to_string())
        })?;

        if let Some(password) = &self.password {
            info.redis.password = Some(password.clone());
        }
        if let Some(db) = self.db {
            info.redis.db = db;
        }

        Ok(info)
    }
}

/// CoordinationStore backed by Redis. Acquire and renew run as Lua scripts,
/// so each is one atomic operation on the server.
///
/// One connection is kept and re-established after transport errors.
pub struct RedisCoordinationStore {
    client: Client,
    config: RedisStoreConfig,
    connection: Mutex<Option<Connection>>,
    acquire_script: Script,
    renew_script: Script,
}

impl fmt::Debug for RedisCoordinationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCoordinationStore")
            .field("config", &self.config)
            .field("connected", &self.connection.lock().is_some())
            .finish()
    }
}

impl RedisCoordinationStore {
    /// Validates the settings. No connection is opened until the first call.
    pub fn new(config: RedisStoreConfig) -> Result<RedisCoordinationStore> {
        let client = Client::open(config.connection_info()?).map_err(|err| {
            ElectionError::misconfigured(
                format!("Cannot create Redis client for {}", config.url),
                err.to_string(),
            )
        })?;

        Ok(RedisCoordinationStore {
            client,
            config,
            connection: Mutex::new(None),
            acquire_script: Script::new(ACQUIRE_SCRIPT),
            renew_script: Script::new(RENEW_SCRIPT),
        })
    }

    pub fn config(&self) -> &RedisStoreConfig {
        &self.config
    }

    fn connect(&self) -> Result<Connection> {
        let connection = self
            .client
            .get_connection_with_timeout(self.config.connection_timeout)
            .map_err(|err| store_error("connect", err))?;

        connection
            .set_read_timeout(Some(self.config.response_timeout))
            .map_err(|err| store_error("connect", err))?;
        connection
            .set_write_timeout(Some(self.config.response_timeout))
            .map_err(|err| store_error("connect", err))?;

        debug!("Connected to Redis at {}", self.config.url);

        Ok(connection)
    }

    fn with_connection<T, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> redis::RedisResult<T>,
    {
        let mut slot = self.connection.lock();
        if slot.is_none() {
            *slot = Some(self.connect()?);
        }

        let connection = match slot.as_mut() {
            Some(connection) => connection,
            None => {
                return Err(ElectionError::store_unavailable(
                    format!("No Redis connection for {}", operation),
                    String::new(),
                ))
            }
        };

        call(connection).map_err(|err| {
            if err.is_io_error() || err.is_connection_dropped() || err.is_timeout() {
                *slot = None;
            }
            store_error(operation, err)
        })
    }
}

impl CoordinationStore for RedisCoordinationStore {
    fn acquire_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<AcquireOutcome> {
        if value == ACQUIRE_CREATED_MARKER {
            return Err(ElectionError::misconfigured(
                format!("Value '{}' is reserved by the acquire script", value),
                String::new(),
            ));
        }

        let ttl_seconds = ttl_seconds(ttl);
        let reply: Option<String> = self.with_connection("acquire", |connection| {
            self.acquire_script
                .key(key)
                .arg(value)
                .arg(ttl_seconds)
                .invoke(connection)
        })?;

        match reply {
            Some(ref marker) if marker == ACQUIRE_CREATED_MARKER => Ok(AcquireOutcome::Created),
            Some(owner) => Ok(AcquireOutcome::Existing(owner)),
            None => Err(ElectionError::protocol_violation(
                format!("Acquire script returned nil for key {}", key),
                String::new(),
            )),
        }
    }

    fn renew_if_owned(&self, key: &str, expected_value: &str, ttl: Duration) -> Result<RenewOutcome> {
        let ttl_milliseconds = ttl_milliseconds(ttl);
        let code: i64 = self.with_connection("renew", |connection| {
            self.renew_script
                .key(key)
                .arg(expected_value)
                .arg(ttl_milliseconds)
                .invoke(connection)
        })?;

        RenewOutcome::from_code(code)
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        self.with_connection("read", |connection| {
            redis::cmd("GET").arg(key).query(connection)
        })
    }
}

/// `EX` takes whole seconds; round up so the lease never outlives less than the term.
fn ttl_seconds(ttl: Duration) -> u64 {
    let seconds = ttl.as_secs() + if ttl.subsec_nanos() > 0 { 1 } else { 0 };

    seconds.max(1)
}

fn ttl_milliseconds(ttl: Duration) -> u64 {
    (ttl.as_millis() as u64).max(1)
}

fn store_error(operation: &str, err: RedisError) -> ElectionError {
    let text = format!("Redis {} failed", operation);
    match err.kind() {
        redis::ErrorKind::TypeError => ElectionError::protocol_violation(text, err.to_string()),
        _ => ElectionError::store_unavailable(text, err.to_string()),
    }
}
