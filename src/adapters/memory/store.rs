use crate::domain::{
    Book, Member, NewBook, NewMember, NewRental, Rental,
    value_objects::{BookId, MemberId, RentalId},
};
use crate::ports::{
    BookStore, MemberStore, RentalStore, RentalView, book_store, member_store, rental_store,
};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// インメモリストア
///
/// 会員・書籍・レンタルの3つのストアポートを1つの構造体で実装する。
/// 参照解決のために同じインスタンスが全レコードを保持する。
/// 挿入順を保持するため `Vec` で管理する。
#[derive(Default)]
pub struct InMemoryStore {
    members: Mutex<Vec<Member>>,
    books: Mutex<Vec<Book>>,
    rentals: Mutex<Vec<Rental>>,
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, BoxError> {
    mutex.lock().map_err(|_| "in-memory store lock poisoned".into())
}

fn replace<T: Clone>(records: &mut Vec<T>, updated: T, same: impl Fn(&T) -> bool) -> Option<T> {
    let slot = records.iter_mut().find(|r| same(r))?;
    *slot = updated.clone();
    Some(updated)
}

fn remove<T>(records: &mut Vec<T>, same: impl Fn(&T) -> bool) -> bool {
    let before = records.len();
    records.retain(|r| !same(r));
    records.len() != before
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&self, rentals: Vec<Rental>) -> Result<Vec<RentalView>, BoxError> {
        let members = lock(&self.members)?;
        let books = lock(&self.books)?;

        Ok(rentals
            .into_iter()
            .map(|rental| RentalView {
                rental_id: rental.rental_id,
                member: members
                    .iter()
                    .find(|m| m.member_id == rental.member_id)
                    .cloned(),
                book: books.iter().find(|b| b.book_id == rental.book_id).cloned(),
                start_date: rental.start_date,
                end_date: rental.end_date,
            })
            .collect())
    }
}

#[async_trait]
impl MemberStore for InMemoryStore {
    async fn find_all(&self) -> member_store::Result<Vec<Member>> {
        Ok(lock(&self.members)?.clone())
    }

    async fn find_by_id(&self, member_id: MemberId) -> member_store::Result<Option<Member>> {
        Ok(lock(&self.members)?
            .iter()
            .find(|m| m.member_id == member_id)
            .cloned())
    }

    async fn insert(&self, member: NewMember) -> member_store::Result<Member> {
        let member = Member {
            member_id: MemberId::new(),
            code: member.code,
            name: member.name,
            email: member.email,
            penalty: member.penalty,
        };
        lock(&self.members)?.push(member.clone());
        Ok(member)
    }

    async fn save(&self, member: Member) -> member_store::Result<Option<Member>> {
        let member_id = member.member_id;
        Ok(replace(&mut *lock(&self.members)?, member, |m| {
            m.member_id == member_id
        }))
    }

    async fn delete_by_id(&self, member_id: MemberId) -> member_store::Result<bool> {
        Ok(remove(&mut *lock(&self.members)?, |m| m.member_id == member_id))
    }
}

#[async_trait]
impl BookStore for InMemoryStore {
    async fn find_all(&self) -> book_store::Result<Vec<Book>> {
        Ok(lock(&self.books)?.clone())
    }

    async fn find_by_id(&self, book_id: BookId) -> book_store::Result<Option<Book>> {
        Ok(lock(&self.books)?
            .iter()
            .find(|b| b.book_id == book_id)
            .cloned())
    }

    async fn insert(&self, book: NewBook) -> book_store::Result<Book> {
        let book = Book {
            book_id: BookId::new(),
            code: book.code,
            title: book.title,
            author: book.author,
            stock: book.stock,
        };
        lock(&self.books)?.push(book.clone());
        Ok(book)
    }

    async fn save(&self, book: Book) -> book_store::Result<Option<Book>> {
        let book_id = book.book_id;
        Ok(replace(&mut *lock(&self.books)?, book, |b| b.book_id == book_id))
    }

    async fn delete_by_id(&self, book_id: BookId) -> book_store::Result<bool> {
        Ok(remove(&mut *lock(&self.books)?, |b| b.book_id == book_id))
    }
}

#[async_trait]
impl RentalStore for InMemoryStore {
    async fn find_all(&self) -> rental_store::Result<Vec<Rental>> {
        Ok(lock(&self.rentals)?.clone())
    }

    async fn find_by_id(&self, rental_id: RentalId) -> rental_store::Result<Option<Rental>> {
        Ok(lock(&self.rentals)?
            .iter()
            .find(|r| r.rental_id == rental_id)
            .cloned())
    }

    async fn count_by_member(&self, member_id: MemberId) -> rental_store::Result<u64> {
        let count = lock(&self.rentals)?
            .iter()
            .filter(|r| r.member_id == member_id)
            .count();
        Ok(count as u64)
    }

    async fn insert(&self, rental: NewRental) -> rental_store::Result<Rental> {
        let rental = Rental {
            rental_id: RentalId::new(),
            member_id: rental.member_id,
            book_id: rental.book_id,
            start_date: rental.start_date,
            end_date: rental.end_date,
        };
        lock(&self.rentals)?.push(rental.clone());
        Ok(rental)
    }

    async fn save(&self, rental: Rental) -> rental_store::Result<Option<Rental>> {
        let rental_id = rental.rental_id;
        Ok(replace(&mut *lock(&self.rentals)?, rental, |r| {
            r.rental_id == rental_id
        }))
    }

    async fn delete_by_id(&self, rental_id: RentalId) -> rental_store::Result<bool> {
        Ok(remove(&mut *lock(&self.rentals)?, |r| r.rental_id == rental_id))
    }

    async fn find_all_resolved(&self) -> rental_store::Result<Vec<RentalView>> {
        let rentals = lock(&self.rentals)?.clone();
        self.resolve(rentals)
    }

    async fn find_resolved_by_id(
        &self,
        rental_id: RentalId,
    ) -> rental_store::Result<Option<RentalView>> {
        let rental = RentalStore::find_by_id(self, rental_id).await?;
        Ok(match rental {
            Some(rental) => self.resolve(vec![rental])?.pop(),
            None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Penalty;
    use chrono::NaiveDate;

    fn new_member(code: &str) -> NewMember {
        NewMember {
            code: code.to_string(),
            name: "Test Member".to_string(),
            email: None,
            penalty: Penalty::None,
        }
    }

    fn new_rental(member_id: MemberId, book_id: BookId) -> NewRental {
        NewRental {
            member_id,
            book_id,
            start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = InMemoryStore::new();
        let a = MemberStore::insert(&store, new_member("M1")).await.unwrap();
        let b = MemberStore::insert(&store, new_member("M2")).await.unwrap();
        assert_ne!(a.member_id, b.member_id);
        assert_eq!(MemberStore::find_all(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_missing_record_returns_none() {
        let store = InMemoryStore::new();
        let ghost = Member {
            member_id: MemberId::new(),
            code: "X".to_string(),
            name: "Ghost".to_string(),
            email: None,
            penalty: Penalty::None,
        };
        assert!(MemberStore::save(&store, ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = InMemoryStore::new();
        let member = MemberStore::insert(&store, new_member("M1")).await.unwrap();
        assert!(MemberStore::delete_by_id(&store, member.member_id).await.unwrap());
        assert!(!MemberStore::delete_by_id(&store, member.member_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_count_by_member_only_counts_that_member() {
        let store = InMemoryStore::new();
        let member_a = MemberId::new();
        let member_b = MemberId::new();
        RentalStore::insert(&store, new_rental(member_a, BookId::new())).await.unwrap();
        RentalStore::insert(&store, new_rental(member_a, BookId::new())).await.unwrap();
        RentalStore::insert(&store, new_rental(member_b, BookId::new())).await.unwrap();

        assert_eq!(store.count_by_member(member_a).await.unwrap(), 2);
        assert_eq!(store.count_by_member(member_b).await.unwrap(), 1);
        assert_eq!(store.count_by_member(MemberId::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_resolution_leaves_dangling_references_empty() {
        let store = InMemoryStore::new();
        let member = MemberStore::insert(&store, new_member("M1")).await.unwrap();
        let rental = RentalStore::insert(&store, new_rental(member.member_id, BookId::new()))
            .await
            .unwrap();

        let view = store
            .find_resolved_by_id(rental.rental_id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(view.member, Some(member));
        assert!(view.book.is_none());
    }
}
