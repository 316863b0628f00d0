//! The hierarchy of IFDs and the pointer tags linking them.
//!
//! Each IFD other than the root is reached through a tag in its parent whose
//! value is the child's offset. An [`IfdMapping`] records those edges, so a
//! decoder knows which tags to follow and what to call the IFDs it finds.

use rustc_hash::FxHashMap;

use exif_tags_types::exif::ifd::{IfdDefinition, STANDARD_IFDS};

use super::error::{HierarchyError, HierarchyResult};

/// One IFD in the hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedIfd {
    parent_tag_id: u16,
    placement: Vec<u16>,
    path: Vec<String>,
    name: String,
    tag_id: u16,
    children: FxHashMap<u16, MappedIfd>,
}

impl MappedIfd {
    fn root() -> Self {
        Self {
            parent_tag_id: 0,
            placement: Vec::new(),
            path: Vec::new(),
            name: String::new(),
            tag_id: 0,
            children: FxHashMap::default(),
        }
    }

    /// Finds the child reached through `tag_id`, if it's mapped.
    pub fn child(&self, tag_id: u16) -> Option<&MappedIfd> {
        self.children.get(&tag_id)
    }

    /// Every mapped child of this IFD.
    pub fn children(&self) -> impl Iterator<Item = &MappedIfd> {
        self.children.values()
    }

    /// The path segment naming this IFD. Empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pointer tags walked from the root to get here.
    pub fn placement(&self) -> &[u16] {
        &self.placement
    }

    /// The names walked from the root to get here, including this one.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The pointer tag in the parent. Zero for the root.
    pub fn tag_id(&self) -> u16 {
        self.tag_id
    }

    /// The pointer tag of the parent. Zero when the parent is the root.
    pub fn parent_tag_id(&self) -> u16 {
        self.parent_tag_id
    }
}

/// A tree of IFDs, keyed by the pointer tags that reach them.
///
/// Tags can only be mapped once, anywhere in the tree. Build the mapping
/// first, then share it - lookups never change it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfdMapping {
    root: MappedIfd,

    /// tag ID => (parent placement, name)
    index: FxHashMap<u16, (Vec<u16>, String)>,
}

impl Default for IfdMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl IfdMapping {
    /// Creates a mapping holding nothing but the root.
    pub fn new() -> Self {
        Self {
            root: MappedIfd::root(),
            index: FxHashMap::default(),
        }
    }

    /// The mapping for IFD 0 and its Exif, GPS, and interoperability IFDs.
    pub fn standard() -> Self {
        Self::from_definitions(STANDARD_IFDS)
            .unwrap_or_else(|e| unreachable!("the standard IFD table is consistent. but err: {e}"))
    }

    /// Builds a mapping from a table of definitions, in order.
    pub fn from_definitions(definitions: &[IfdDefinition]) -> HierarchyResult<Self> {
        let mut mapping = Self::new();
        for def in definitions {
            mapping.add(def.parent_placement, def.tag_id, def.group.name())?;
        }
        Ok(mapping)
    }

    /// Maps the IFD pointed to by `tag_id`, under the IFD at
    /// `parent_placement`.
    ///
    /// Adding the exact same mapping twice is fine. Mapping a tag somewhere
    /// else, or under another name, is not.
    pub fn add(&mut self, parent_placement: &[u16], tag_id: u16, name: &str) -> HierarchyResult<()> {
        if let Some((existing_parent, existing_name)) = self.index.get(&tag_id) {
            if existing_parent.as_slice() == parent_placement && existing_name == name {
                log::trace!("Tag `{tag_id:#06x}` is already mapped as `{name}`.");
                return Ok(());
            }

            log::error!(
                "Tag `{tag_id:#06x}` is already mapped! \
                existing: `{existing_name}` under `{existing_parent:x?}`, \
                requested: `{name}` under `{parent_placement:x?}`"
            );
            return Err(HierarchyError::DuplicateDirectoryMapping {
                tag_id,
                existing_parent: existing_parent.clone(),
                requested_parent: parent_placement.to_vec(),
            });
        }

        let Some(parent) = self.get_mut(parent_placement) else {
            log::error!("Can't map `{name}`. No parent at `{parent_placement:x?}`.");
            return Err(HierarchyError::UnknownParent {
                placement: parent_placement.to_vec(),
            });
        };

        let mut placement = parent.placement.clone();
        placement.push(tag_id);
        let mut path = parent.path.clone();
        path.push(name.to_owned());

        let child = MappedIfd {
            parent_tag_id: parent.tag_id,
            placement,
            path,
            name: name.to_owned(),
            tag_id,
            children: FxHashMap::default(),
        };
        parent.children.insert(tag_id, child);

        self.index
            .insert(tag_id, (parent_placement.to_vec(), name.to_owned()));
        log::trace!("Mapped `{name}` as tag `{tag_id:#06x}` under `{parent_placement:x?}`.");
        Ok(())
    }

    /// The root. It stands for whichever IFD the walk starts at.
    pub fn root(&self) -> &MappedIfd {
        &self.root
    }

    /// Finds the IFD reached by following `placement` from the root.
    pub fn get(&self, placement: &[u16]) -> Option<&MappedIfd> {
        placement
            .iter()
            .try_fold(&self.root, |node, tag_id| node.child(*tag_id))
    }

    fn get_mut(&mut self, placement: &[u16]) -> Option<&mut MappedIfd> {
        placement
            .iter()
            .try_fold(&mut self.root, |node, tag_id| node.children.get_mut(tag_id))
    }

    /// Finds the IFD at the given path of names.
    pub fn find_by_path(&self, path: &[&str]) -> Option<&MappedIfd> {
        path.iter().try_fold(&self.root, |node, segment| {
            node.children().find(|child| child.name() == *segment)
        })
    }
}
