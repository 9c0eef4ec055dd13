use tutorspet_core::db::{open_db, open_db_in_memory};
use tutorspet_core::sample::{sample_address_book, sample_dates_book};
use tutorspet_core::{
    AddressBook, BookStorage, DatesBook, Name, Person, Phone, SqliteBookStorage, StorageError,
};

#[test]
fn nothing_saved_loads_as_none() {
    let mut conn = open_db_in_memory().unwrap();
    let storage = SqliteBookStorage::try_new(&mut conn).unwrap();

    assert!(storage.load_address_book().unwrap().is_none());
    assert!(storage.load_dates_book().unwrap().is_none());
}

#[test]
fn saved_empty_book_loads_as_empty() {
    let mut conn = open_db_in_memory().unwrap();
    let mut storage = SqliteBookStorage::try_new(&mut conn).unwrap();

    storage.save_address_book(&AddressBook::new()).unwrap();
    let loaded = storage.load_address_book().unwrap().unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn books_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tutorspet.db");

    {
        let mut conn = open_db(&path).unwrap();
        let mut storage = SqliteBookStorage::try_new(&mut conn).unwrap();
        storage.save_address_book(&sample_address_book()).unwrap();
        storage.save_dates_book(&sample_dates_book()).unwrap();
    }

    let mut conn = open_db(&path).unwrap();
    let storage = SqliteBookStorage::try_new(&mut conn).unwrap();
    assert_eq!(
        storage.load_address_book().unwrap().unwrap(),
        sample_address_book()
    );
    assert_eq!(storage.load_dates_book().unwrap().unwrap(), sample_dates_book());
}

#[test]
fn saving_again_replaces_previous_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let mut storage = SqliteBookStorage::try_new(&mut conn).unwrap();
    storage.save_address_book(&sample_address_book()).unwrap();

    let single = AddressBook::from_persons(vec![Person::builder(
        Name::new("Solo Student").unwrap(),
        Phone::new("81234567").unwrap(),
    )
    .build()])
    .unwrap();
    storage.save_address_book(&single).unwrap();
    storage.save_dates_book(&DatesBook::new()).unwrap();

    assert_eq!(storage.load_address_book().unwrap().unwrap(), single);
    assert!(storage.load_dates_book().unwrap().unwrap().is_empty());
}

#[test]
fn invalid_persisted_value_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut storage = SqliteBookStorage::try_new(&mut conn).unwrap();
        storage.save_address_book(&sample_address_book()).unwrap();
    }
    conn.execute("UPDATE persons SET phone = 'not-a-phone' WHERE position = 0;", [])
        .unwrap();

    let storage = SqliteBookStorage::try_new(&mut conn).unwrap();
    let err = storage.load_address_book().unwrap_err();
    match err {
        StorageError::Validation(validation) => assert_eq!(validation.field, "phone"),
        other => panic!("unexpected error: {other}"),
    }
}
