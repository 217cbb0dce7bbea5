//! Owner and group name lookup.

use std::collections::HashMap;

use users::{Groups, Users, UsersCache};

use crate::error::{Error, Result};

/// Maps numeric owner and group ids to display names.
pub trait IdentityResolver {
    fn user_name(&self, uid: u32) -> Result<String>;
    fn group_name(&self, gid: u32) -> Result<String>;
}

/// Resolves against the host user and group databases.
///
/// Lookups go through a [`UsersCache`], so an id seen twice in one run is
/// answered from memory and always maps to the same name.
pub struct SystemIdentity {
    cache: UsersCache,
}

impl SystemIdentity {
    pub fn new() -> Self {
        Self {
            cache: UsersCache::new(),
        }
    }
}

impl Default for SystemIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityResolver for SystemIdentity {
    fn user_name(&self, uid: u32) -> Result<String> {
        self.cache
            .get_user_by_uid(uid)
            .map(|user| user.name().to_string_lossy().into_owned())
            .ok_or(Error::UnknownUser(uid))
    }

    fn group_name(&self, gid: u32) -> Result<String> {
        self.cache
            .get_group_by_gid(gid)
            .map(|group| group.name().to_string_lossy().into_owned())
            .ok_or(Error::UnknownGroup(gid))
    }
}

/// A fixed id-to-name table, for runs that must not depend on the host.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user(mut self, uid: u32, name: impl Into<String>) -> Self {
        self.users.insert(uid, name.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, gid: u32, name: impl Into<String>) -> Self {
        self.groups.insert(gid, name.into());
        self
    }
}

impl IdentityResolver for StaticIdentity {
    fn user_name(&self, uid: u32) -> Result<String> {
        self.users.get(&uid).cloned().ok_or(Error::UnknownUser(uid))
    }

    fn group_name(&self, gid: u32) -> Result<String> {
        self.groups.get(&gid).cloned().ok_or(Error::UnknownGroup(gid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn static_table_resolves_known_ids() {
        let ids = StaticIdentity::new().with_user(1000, "alice").with_group(100, "users");
        assert_eq!(ids.user_name(1000).unwrap(), "alice");
        assert_eq!(ids.group_name(100).unwrap(), "users");
    }

    #[test]
    fn static_table_rejects_unknown_ids() {
        let ids = StaticIdentity::new();
        assert!(matches!(ids.user_name(4242), Err(Error::UnknownUser(4242))));
        assert!(matches!(ids.group_name(4343), Err(Error::UnknownGroup(4343))));
    }

    #[test]
    fn system_lookup_is_stable_within_a_run() {
        let ids = SystemIdentity::new();
        let uid = users::get_current_uid();
        let gid = users::get_current_gid();
        if let Ok(first) = ids.user_name(uid) {
            assert_eq!(ids.user_name(uid).unwrap(), first);
        }
        if let Ok(first) = ids.group_name(gid) {
            assert_eq!(ids.group_name(gid).unwrap(), first);
        }
    }

    #[test]
    fn static_lookup_is_stable_within_a_run() {
        let ids = StaticIdentity::new().with_user(0, "root").with_group(0, "wheel");
        for _ in 0..3 {
            assert_eq!(ids.user_name(0).unwrap(), "root");
            assert_eq!(ids.group_name(0).unwrap(), "wheel");
        }
    }
}
