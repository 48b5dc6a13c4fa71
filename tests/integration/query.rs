//! Tests for listing, filtering and paginating real refs

use crate::common::{BASE_TIME, TestFixture};
use gotobranch::Error;
use gotobranch::git::{GitCli, RefSource};
use gotobranch::query::{Query, Scope, SortBy, SortDir, list_branches, locate};
use pretty_assertions::assert_eq;

fn names(page: &gotobranch::query::QueryPage) -> Vec<&str> {
    page.items.iter().map(|b| b.name.as_str()).collect()
}

#[test]
fn test_single_commit_repo_lists_current_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;

    let page = list_branches(&GitCli::new(), &fixture.query(Scope::Local))?;

    assert_eq!(page.total, 1);
    let branch = &page.items[0];
    assert_eq!(branch.name, "master");
    assert_eq!(branch.full_ref, "refs/heads/master");
    assert!(branch.is_current);
    assert!(!branch.is_remote);
    assert_eq!(branch.head_commit_sha.as_deref().map(str::len), Some(40));
    assert_eq!(branch.last_commit_message.as_deref(), Some("Initial commit"));
    assert_eq!(
        branch.head_commit_at.map(|t| t.timestamp()),
        Some(BASE_TIME)
    );
    Ok(())
}

#[test]
fn test_scope_all_filters_local_and_remote() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    for name in ["main", "feat/alpha", "fix/beta"] {
        fixture.branch(name, 10)?;
        fixture.remote_branch(name, 20)?;
    }

    let mut query = fixture.query(Scope::All);
    query.pattern = "feat".to_string();
    let page = list_branches(&GitCli::new(), &query)?;

    let mut found = names(&page);
    found.sort_unstable();
    assert_eq!(found, vec!["feat/alpha", "origin/feat/alpha"]);
    assert_eq!(page.total, 2);

    let remote = page
        .items
        .iter()
        .find(|b| b.is_remote)
        .ok_or("no remote entry")?;
    assert_eq!(remote.full_ref, "refs/remotes/origin/feat/alpha");
    assert!(!remote.is_current);
    Ok(())
}

#[test]
fn test_scope_partitions() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture.branch("dev", 10)?.remote_branch("dev", 20)?;
    let source = GitCli::new();

    let local = list_branches(&source, &fixture.query(Scope::Local))?;
    assert!(local.items.iter().all(|b| !b.is_remote));
    assert_eq!(local.total, 2);

    let remote = list_branches(&source, &fixture.query(Scope::Remote))?;
    assert_eq!(names(&remote), vec!["origin/dev"]);

    let all = list_branches(&source, &fixture.query(Scope::All))?;
    assert_eq!(all.total, 3);
    Ok(())
}

#[test]
fn test_detached_head() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture.branch("dev", 10)?;
    fixture.detach()?;
    let source = GitCli::new();

    let current = source.current_branch(Some(&fixture.repo_path));
    assert!(matches!(current, Err(Error::DetachedHead)));

    let page = list_branches(&source, &fixture.query(Scope::Local))?;
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|b| !b.is_current));
    Ok(())
}

#[test]
fn test_recency_and_name_ordering() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture
        .branch("old", 10)?
        .branch("newest", 30)?
        .branch("middle", 20)?;
    let source = GitCli::new();

    let page = list_branches(&source, &fixture.query(Scope::Local))?;
    assert_eq!(names(&page), vec!["newest", "middle", "old", "master"]);

    let query = Query {
        sort_by: SortBy::Name,
        sort_dir: SortDir::Asc,
        ..fixture.query(Scope::Local)
    };
    let page = list_branches(&source, &query)?;
    assert_eq!(names(&page), vec!["master", "middle", "newest", "old"]);
    Ok(())
}

#[test]
fn test_pages_cover_every_branch_once() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    for (i, name) in ["a", "b", "c", "d"].into_iter().enumerate() {
        fixture.branch(name, i64::try_from(i)? + 1)?;
    }
    let source = GitCli::new();

    let mut seen = Vec::new();
    let mut query = Query {
        page_size: 2,
        ..fixture.query(Scope::Local)
    };
    loop {
        let page = list_branches(&source, &query)?;
        assert!(page.items.len() <= 2);
        seen.extend(page.items.iter().map(|b| b.name.clone()));
        if !page.has_next {
            assert_eq!(page.total_pages(), query.page);
            break;
        }
        query.page += 1;
    }

    assert_eq!(seen, vec!["d", "c", "b", "a", "master"]);
    Ok(())
}

#[test]
fn test_page_past_end_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let query = Query {
        page: 9,
        page_size: 5,
        ..fixture.query(Scope::Local)
    };

    let page = list_branches(&GitCli::new(), &query)?;
    assert!(page.items.is_empty());
    assert_eq!(page.total, 1);
    assert!(page.has_prev);
    assert!(!page.has_next);
    Ok(())
}

#[test]
fn test_refresh_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture.branch("dev", 10)?.remote_branch("dev", 5)?;
    let source = GitCli::new();
    let query = fixture.query(Scope::All);

    let first = list_branches(&source, &query)?;
    let second = list_branches(&source, &query)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_locate_across_pages() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture
        .branch("c", 1)?
        .branch("b", 2)?
        .branch("a", 3)?;
    let source = GitCli::new();
    let query = Query {
        page_size: 2,
        ..fixture.query(Scope::Local)
    };

    assert_eq!(locate(&source, &query, 3)?.name, "c");
    assert_eq!(locate(&source, &query, 4)?.name, "master");
    assert!(matches!(
        locate(&source, &query, 5),
        Err(Error::OutOfRange {
            requested: 5,
            total: 4
        })
    ));
    Ok(())
}

#[test]
fn test_listing_outside_repository_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::TempDir::new()?;
    let query = Query {
        repo_path: Some(dir.path().to_path_buf()),
        ..Query::default()
    };

    let result = list_branches(&GitCli::new(), &query);
    assert!(matches!(result, Err(Error::Git { .. })));
    Ok(())
}
