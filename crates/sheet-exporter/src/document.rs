//! Ownership state of the exported document

use sheet_exporter_core::Workbook;

use crate::error::{ExportError, ExportResult};

/// The exporter's document, or the marker left after it was released
#[derive(Debug)]
pub enum DocumentState {
    Attached(Workbook),
    Disconnected,
}

impl DocumentState {
    pub fn is_attached(&self) -> bool {
        matches!(self, DocumentState::Attached(_))
    }

    /// Borrow the workbook; `operation` names the caller in the error
    pub fn workbook(&self, operation: &'static str) -> ExportResult<&Workbook> {
        match self {
            DocumentState::Attached(workbook) => Ok(workbook),
            DocumentState::Disconnected => Err(ExportError::Disconnected { operation }),
        }
    }

    pub fn workbook_mut(&mut self, operation: &'static str) -> ExportResult<&mut Workbook> {
        match self {
            DocumentState::Attached(workbook) => Ok(workbook),
            DocumentState::Disconnected => Err(ExportError::Disconnected { operation }),
        }
    }

    /// Release the workbook, returning it if it was still attached
    pub fn disconnect(&mut self) -> Option<Workbook> {
        match std::mem::replace(self, DocumentState::Disconnected) {
            DocumentState::Attached(workbook) => Some(workbook),
            DocumentState::Disconnected => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnect_is_one_way() {
        let mut document = DocumentState::Attached(Workbook::new());
        assert!(document.is_attached());
        assert_eq!(document.workbook("read").unwrap().sheet_count(), 1);

        assert!(document.disconnect().is_some());
        assert!(!document.is_attached());
        assert!(document.disconnect().is_none());
        assert!(matches!(
            document.workbook_mut("write"),
            Err(ExportError::Disconnected { operation: "write" })
        ));
    }
}
