use projectbook::catalog::projects::{NewProject, create_project};
use projectbook::catalog::skills::{
    attach_skill, detach_skill, get_owner_project_skills, get_project_skills, get_skills,
};
use projectbook::core::config::StoreConfig;
use projectbook::core::store::Store;
use rusqlite::Connection;
use tempfile::{TempDir, tempdir};

fn store_with_project(owner: &str, name: &str) -> (TempDir, Store) {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path(), &StoreConfig::default()).unwrap();
    create_project(
        &store,
        &NewProject {
            owner_id: owner.to_string(),
            project_name: name.to_string(),
            description: None,
            url: None,
            status_name: "prototype".to_string(),
            screenshot: None,
        },
    )
    .unwrap();
    (tmp, store)
}

fn link_count(store: &Store) -> i64 {
    let conn = Connection::open(store.db_path()).unwrap();
    conn.query_row("SELECT COUNT(*) FROM project_skills", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn get_skills_lists_seeded_vocabulary_in_order() {
    let (_tmp, store) = store_with_project("u1", "Tracker");
    let skills = get_skills(&store).unwrap();
    let names: Vec<&str> = skills.iter().map(|s| s.skill_name.as_str()).collect();
    assert_eq!(names, vec!["Python", "SQL", "API", "Discord"]);
    assert!(skills.windows(2).all(|w| w[0].skill_id < w[1].skill_id));
}

#[test]
fn attach_twice_keeps_one_link() {
    let (_tmp, store) = store_with_project("u1", "Tracker");
    assert!(attach_skill(&store, "u1", "Tracker", "Python").unwrap());
    assert!(!attach_skill(&store, "u1", "Tracker", "Python").unwrap());
    assert_eq!(link_count(&store), 1);
    assert_eq!(get_project_skills(&store, "Tracker").unwrap(), "Python");
}

#[test]
fn attach_to_foreign_project_is_not_found() {
    let (_tmp, store) = store_with_project("u1", "Tracker");
    let err = attach_skill(&store, "u2", "Tracker", "Python").unwrap_err();
    assert!(err.is_not_found(), "{err}");
    assert!(err.to_string().contains("project"));
    assert_eq!(link_count(&store), 0);
}

#[test]
fn attach_unknown_skill_is_not_found() {
    let (_tmp, store) = store_with_project("u1", "Tracker");
    let err = attach_skill(&store, "u1", "Tracker", "COBOL").unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("skill 'COBOL'"));
    assert_eq!(link_count(&store), 0);
}

#[test]
fn project_skills_join_in_attachment_order() {
    let (_tmp, store) = store_with_project("u1", "Tracker");
    assert_eq!(get_project_skills(&store, "Tracker").unwrap(), "");
    for skill in ["SQL", "Discord", "Python"] {
        attach_skill(&store, "u1", "Tracker", skill).unwrap();
    }
    assert_eq!(
        get_project_skills(&store, "Tracker").unwrap(),
        "SQL, Discord, Python"
    );
    assert_eq!(get_project_skills(&store, "Missing").unwrap(), "");
}

#[test]
fn detach_removes_only_the_named_link() {
    let (_tmp, store) = store_with_project("u1", "Tracker");
    attach_skill(&store, "u1", "Tracker", "Python").unwrap();
    attach_skill(&store, "u1", "Tracker", "API").unwrap();

    let err = detach_skill(&store, "u2", "Tracker", "API").unwrap_err();
    assert!(err.is_not_found());
    assert!(detach_skill(&store, "u1", "Tracker", "API").unwrap());
    assert!(!detach_skill(&store, "u1", "Tracker", "API").unwrap());
    assert_eq!(get_project_skills(&store, "Tracker").unwrap(), "Python");
}

#[test]
fn owner_project_skills_ignore_other_owners_same_name() {
    let (_tmp, store) = store_with_project("u1", "Tracker");
    create_project(
        &store,
        &NewProject {
            owner_id: "u2".to_string(),
            project_name: "Tracker".to_string(),
            description: None,
            url: None,
            status_name: "prototype".to_string(),
            screenshot: None,
        },
    )
    .unwrap();
    attach_skill(&store, "u2", "Tracker", "SQL").unwrap();
    attach_skill(&store, "u1", "Tracker", "API").unwrap();

    assert_eq!(get_owner_project_skills(&store, "u1", "Tracker").unwrap(), "API");
    assert_eq!(get_owner_project_skills(&store, "u2", "Tracker").unwrap(), "SQL");
    // The name-only lookup still spans both owners.
    assert_eq!(get_project_skills(&store, "Tracker").unwrap(), "SQL, API");

    let err = get_owner_project_skills(&store, "u3", "Tracker").unwrap_err();
    assert!(err.is_not_found());
}
