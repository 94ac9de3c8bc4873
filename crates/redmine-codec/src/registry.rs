//! Process-wide converter table.
//!
//! Built once on first use from the registration list below and never
//! mutated afterwards, so lookups need no locking.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::convert::{Converter, Entity, EntityConverter};
use crate::entities::*;

type Table = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

static TABLE: OnceLock<Table> = OnceLock::new();

fn entry<T: Entity>() -> (TypeId, Box<dyn Any + Send + Sync>) {
    let converter: &'static dyn Converter<T> = Box::leak(Box::new(EntityConverter::<T>::new()));
    (TypeId::of::<T>(), Box::new(converter))
}

macro_rules! register {
    ($($ty:ty),+ $(,)?) => {
        [$(entry::<$ty>()),+]
    };
}

fn build() -> Table {
    let table: Table = register![
        Attachment,
        ChangeSet,
        CustomField,
        CustomFieldPossibleValue,
        CustomFieldRole,
        CustomFieldValue,
        Detail,
        DocumentCategory,
        File,
        Group,
        GroupUser,
        Issue,
        IssueAllowedStatus,
        IssueCategory,
        IssueChild,
        IssueCustomField,
        IssuePriority,
        IssueRelation,
        IssueStatus,
        Journal,
        Membership,
        MembershipRole,
        MyAccount,
        News,
        NewsComment,
        Permission,
        Project,
        ProjectEnabledModule,
        ProjectIssueCategory,
        ProjectTimeEntryActivity,
        ProjectTracker,
        Query,
        Role,
        SearchResult,
        TimeEntry,
        TimeEntryActivity,
        Tracker,
        TrackerCoreField,
        TrackerCustomField,
        Upload,
        User,
        UserGroup,
        Version,
        Watcher,
        WikiPage,
        WikiPageInfo,
    ]
    .into_iter()
    .collect();
    tracing::debug!(converters = table.len(), "converter registry built");
    table
}

/// Returns the converter registered for `T`.
///
/// # Panics
///
/// When `T` is missing from the registration list.
pub fn get<T: Entity>() -> &'static dyn Converter<T> {
    let table = TABLE.get_or_init(build);
    match table
        .get(&TypeId::of::<T>())
        .and_then(|c| c.downcast_ref::<&'static dyn Converter<T>>())
    {
        Some(converter) => *converter,
        None => panic!(
            "no converter registered for {}",
            std::any::type_name::<T>()
        ),
    }
}

/// Whether `T` has a registered converter.
pub fn contains<T: Entity>() -> bool {
    TABLE.get_or_init(build).contains_key(&TypeId::of::<T>())
}

/// Number of registered converters.
pub fn len() -> usize {
    TABLE.get_or_init(build).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use redmine_wire::WireReader;

    #[derive(Default)]
    struct Unregistered;

    impl Entity for Unregistered {
        const ROOT: &'static str = "unregistered";
        const COLLECTION: &'static str = "unregistered";

        fn read_field(&mut self, _key: &str, _reader: &mut dyn WireReader) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn lookups_return_the_matching_converter() {
        assert_eq!(get::<Issue>().root(), "issue");
        assert_eq!(get::<Issue>().collection(), "issues");
        assert_eq!(get::<TimeEntry>().root(), "time_entry");
        assert_eq!(get::<IssueCustomField>().root(), "custom_field");
        assert!(contains::<WikiPageInfo>());
        assert_eq!(len(), 46);
    }

    #[test]
    fn lookups_are_shared_across_threads() {
        let roots: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| get::<Project>().root()))
            .map(|h| h.join().unwrap())
            .collect();
        assert!(roots.iter().all(|r| *r == "project"));
    }

    #[test]
    #[should_panic(expected = "no converter registered")]
    fn missing_registration_panics() {
        let _ = get::<Unregistered>();
    }
}
