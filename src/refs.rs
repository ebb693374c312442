use pdf_writer::Ref;
use std::collections::HashMap;

/// Every kind of indirect object the renderer writes. Pages are keyed by their 0-based
/// position in the layout, fonts by their slot in the font table.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    ToUnicode(usize),
    FontDescriptor(usize),
    FontData(usize),
}

pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    fn new_id(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// Allocate the object id for `ref_type`, or return the one already allocated
    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        if let Some(id) = self.get(ref_type) {
            return id;
        }
        let id = self.new_id();
        self.refs.insert(ref_type, id);
        id
    }
}
