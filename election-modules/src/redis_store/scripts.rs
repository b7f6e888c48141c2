/// Reply of the acquire script when it created the lease.
pub const ACQUIRE_CREATED_MARKER: &str = "OK";

/// KEYS[1] = lease key, ARGV[1] = owner value, ARGV[2] = ttl in seconds.
///
/// Returns the current owner unchanged, or the created marker.
pub const ACQUIRE_SCRIPT: &str = r#"
local current_value = redis.call('GET', KEYS[1])
if current_value then
    return current_value
else
    redis.call('SET', KEYS[1], ARGV[1], 'EX', ARGV[2], 'NX')
    return "OK"
end
"#;

/// KEYS[1] = lease key, ARGV[1] = expected owner, ARGV[2] = ttl in milliseconds.
///
/// Returns 1 when renewed, 0 when absent, 2 when owned by someone else.
pub const RENEW_SCRIPT: &str = r#"
local current_value = redis.call('GET', KEYS[1])
if current_value == ARGV[1] then
    redis.call('PEXPIRE', KEYS[1], tonumber(ARGV[2]))
    return 1
elseif current_value == false then
    return 0
else
    return 2
end
"#;
