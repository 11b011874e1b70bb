use crate::model::document::{DocumentMeta, DocumentRecord, DocumentType};
use crate::model::file::FileHandle;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Ordered supporting documents. Order is both display and submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentList {
    records: Arc<Vec<DocumentRecord>>,
}

impl DocumentList {
    /// Appends a new record. Without both a type and a file this is a no-op.
    pub fn add(
        &mut self,
        selection: Option<DocumentType>,
        file: Option<FileHandle>,
    ) -> Option<&DocumentRecord> {
        let (doc_type, file) = (selection?, file?);
        let records = Arc::make_mut(&mut self.records);
        records.push(DocumentRecord {
            id: Uuid::new_v4(),
            doc_type,
            file,
            uploaded_at: Utc::now(),
        });
        records.last()
    }

    /// Removes the record with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: Uuid) -> Option<DocumentRecord> {
        let index = self.records.iter().position(|record| record.id == id)?;
        Some(Arc::make_mut(&mut self.records).remove(index))
    }

    /// Changes the display type of one record in place. Position and file are kept.
    pub fn retype(&mut self, id: Uuid, doc_type: DocumentType) -> bool {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return false;
        };
        Arc::make_mut(&mut self.records)[index].doc_type = doc_type;
        true
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `documentsMeta` entries, positionally aligned with `records()`.
    pub fn metas(&self) -> Vec<DocumentMeta> {
        self.records.iter().map(DocumentRecord::meta).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileHandle {
        FileHandle::new(name, "application/pdf", name.as_bytes().to_vec())
    }

    fn statement() -> Option<DocumentType> {
        Some(DocumentType::new("bank_statement", "Bank Statement"))
    }

    #[test]
    fn add_requires_type_and_file() {
        let mut list = DocumentList::default();
        assert!(list.add(None, Some(file("a.pdf"))).is_none());
        assert!(list.add(statement(), None).is_none());
        assert!(list.is_empty());

        assert!(list.add(statement(), Some(file("a.pdf"))).is_some());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_undoes_add() {
        let mut list = DocumentList::default();
        list.add(statement(), Some(file("a.pdf")));
        list.add(Some(DocumentType::new("salary_slip", "Salary Slip")), Some(file("b.pdf")));
        let before = list.clone();

        let id = list.add(statement(), Some(file("c.pdf"))).map(|r| r.id).unwrap();
        assert_eq!(list.len(), 3);
        list.remove(id);

        assert_eq!(list, before);
    }

    #[test]
    fn removing_unknown_id_is_a_noop() {
        let mut list = DocumentList::default();
        list.add(statement(), Some(file("a.pdf")));
        let before = list.clone();
        assert!(list.remove(Uuid::new_v4()).is_none());
        assert_eq!(list, before);
    }

    #[test]
    fn retype_keeps_position_and_file() {
        let mut list = DocumentList::default();
        list.add(statement(), Some(file("a.pdf")));
        let id = list.add(statement(), Some(file("b.pdf"))).map(|r| r.id).unwrap();

        assert!(list.retype(id, DocumentType::custom("Rent Agreement")));
        assert!(!list.retype(Uuid::new_v4(), DocumentType::custom("x")));

        let second = &list.records()[1];
        assert_eq!(second.id, id);
        assert_eq!(second.file.name(), "b.pdf");
        assert_eq!(second.doc_type.value, "Rent Agreement");
    }

    #[test]
    fn ids_are_unique_and_order_is_kept() {
        let mut list = DocumentList::default();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            list.add(statement(), Some(file(name)));
        }
        let names: Vec<_> = list.metas().into_iter().map(|m| m.filename).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);

        let records = list.records();
        assert_ne!(records[0].id, records[1].id);
        assert_ne!(records[1].id, records[2].id);
    }
}
