use std::collections::HashSet;

use glam::{Mat4, Vec3};
use slotmap::{new_key_type, SecondaryMap, SlotMap};

use super::{
    error::{AwsmTransformError, Result},
    Transform, WorldTransform,
};

new_key_type! {
    pub struct TransformKey;
}

/// Parent/child hierarchy of local transforms with cached world values.
///
/// Mutations mark the node and its whole subtree dirty right away.
/// World values are only recomputed when read (or on `update_world`),
/// walking up to the nearest clean ancestor first.
#[derive(Debug, Default)]
pub struct Transforms {
    locals: SlotMap<TransformKey, Transform>,
    worlds: SecondaryMap<TransformKey, WorldTransform>,
    children: SecondaryMap<TransformKey, Vec<TransformKey>>,
    parents: SecondaryMap<TransformKey, TransformKey>,
    dirties: HashSet<TransformKey>,
}

impl Transforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        transform: Transform,
        parent: Option<TransformKey>,
    ) -> Result<TransformKey> {
        if let Some(parent) = parent {
            if !self.locals.contains_key(parent) {
                return Err(AwsmTransformError::ParentNotFound(parent));
            }
        }

        let world = WorldTransform::from_root(&transform);
        let key = self.locals.insert(transform);

        self.worlds.insert(key, world);
        self.children.insert(key, Vec::new());
        self.dirties.insert(key);

        if let Some(parent) = parent {
            self.attach(key, parent);
        }

        Ok(key)
    }

    /// Children of the removed node become roots, keeping their local values
    pub fn remove(&mut self, key: TransformKey) -> Result<Transform> {
        if !self.locals.contains_key(key) {
            return Err(AwsmTransformError::LocalNotFound(key));
        }

        self.detach(key);

        let orphans = self.children.remove(key).unwrap_or_default();
        for orphan in orphans {
            self.parents.remove(orphan);
            self.mark_dirty(orphan);
        }

        self.worlds.remove(key);
        self.dirties.remove(&key);

        self.locals
            .remove(key)
            .ok_or(AwsmTransformError::LocalNotFound(key))
    }

    pub fn contains(&self, key: TransformKey) -> bool {
        self.locals.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.locals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locals.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = TransformKey> + '_ {
        self.locals.keys()
    }

    // None makes the node a root
    pub fn set_parent(&mut self, child: TransformKey, parent: Option<TransformKey>) -> Result<()> {
        if !self.locals.contains_key(child) {
            return Err(AwsmTransformError::LocalNotFound(child));
        }

        if let Some(parent) = parent {
            if !self.locals.contains_key(parent) {
                return Err(AwsmTransformError::ParentNotFound(parent));
            }
            if parent == child || self.is_ancestor(child, parent) {
                return Err(AwsmTransformError::Cycle { child, parent });
            }
        }

        if self.parents.get(child).copied() == parent {
            return Ok(());
        }

        self.detach(child);
        if let Some(parent) = parent {
            self.attach(child, parent);
        }
        self.mark_dirty(child);

        Ok(())
    }

    pub fn parent(&self, key: TransformKey) -> Option<TransformKey> {
        self.parents.get(key).copied()
    }

    pub fn children(&self, key: TransformKey) -> &[TransformKey] {
        self.children
            .get(key)
            .map(|children| children.as_slice())
            .unwrap_or_default()
    }

    pub fn get_local(&self, key: TransformKey) -> Result<&Transform> {
        self.locals
            .get(key)
            .ok_or(AwsmTransformError::LocalNotFound(key))
    }

    // This is the only way to modify local values (since it must manage the dirty flags)
    pub fn set_local(&mut self, key: TransformKey, transform: Transform) -> Result<()> {
        self.modify(key, |local| *local = transform)
    }

    pub fn set_position(&mut self, key: TransformKey, position: Vec3) -> Result<()> {
        self.modify(key, |local| local.position = position)
    }

    pub fn set_rotation(&mut self, key: TransformKey, rotation: Vec3) -> Result<()> {
        self.modify(key, |local| local.rotation = rotation)
    }

    pub fn set_scale(&mut self, key: TransformKey, scale: Vec3) -> Result<()> {
        self.modify(key, |local| local.scale = scale)
    }

    pub fn translate(&mut self, key: TransformKey, delta: Vec3) -> Result<()> {
        self.modify(key, |local| local.position += delta)
    }

    pub fn rotate(&mut self, key: TransformKey, delta_degrees: Vec3) -> Result<()> {
        self.modify(key, |local| local.rotation += delta_degrees)
    }

    pub fn is_dirty(&self, key: TransformKey) -> bool {
        self.dirties.contains(&key)
    }

    pub fn world(&mut self, key: TransformKey) -> Result<&WorldTransform> {
        self.resolve(key)?;
        self.worlds
            .get(key)
            .ok_or(AwsmTransformError::LocalNotFound(key))
    }

    pub fn world_position(&mut self, key: TransformKey) -> Result<Vec3> {
        Ok(self.world(key)?.position)
    }

    pub fn world_rotation(&mut self, key: TransformKey) -> Result<Vec3> {
        Ok(self.world(key)?.rotation)
    }

    pub fn world_scale(&mut self, key: TransformKey) -> Result<Vec3> {
        Ok(self.world(key)?.scale)
    }

    pub fn world_matrix(&mut self, key: TransformKey) -> Result<Mat4> {
        Ok(self.world(key)?.matrix)
    }

    /// Recomputes every dirty node, typically once per frame before reads
    pub fn update_world(&mut self) {
        let dirties: Vec<TransformKey> = self.dirties.iter().copied().collect();
        for key in dirties {
            // removed keys never stay in the dirty set, so this cannot fail
            let _ = self.resolve(key);
        }
    }

    fn modify(&mut self, key: TransformKey, f: impl FnOnce(&mut Transform)) -> Result<()> {
        let local = self
            .locals
            .get_mut(key)
            .ok_or(AwsmTransformError::LocalNotFound(key))?;
        f(local);
        self.mark_dirty(key);
        Ok(())
    }

    // See: https://gameprogrammingpatterns.com/dirty-flag.html
    // invalidation is eager (the whole subtree is flagged here)
    // so a clean node always implies clean ancestors
    fn mark_dirty(&mut self, key: TransformKey) {
        let mut stack = vec![key];
        while let Some(key) = stack.pop() {
            self.dirties.insert(key);
            if let Some(children) = self.children.get(key) {
                stack.extend(children.iter().copied());
            }
        }
    }

    // recomputation is lazy: gather the dirty chain up to the first clean
    // ancestor, then fill in world values from the top down
    fn resolve(&mut self, key: TransformKey) -> Result<()> {
        if !self.locals.contains_key(key) {
            return Err(AwsmTransformError::LocalNotFound(key));
        }

        let mut chain = Vec::new();
        let mut current = Some(key);
        while let Some(node) = current {
            if !self.dirties.contains(&node) {
                break;
            }
            chain.push(node);
            current = self.parents.get(node).copied();
        }

        for node in chain.into_iter().rev() {
            let local = &self.locals[node];
            let world = match self.parents.get(node).and_then(|parent| self.worlds.get(*parent)) {
                Some(parent_world) => WorldTransform::from_parent(parent_world, local),
                None => WorldTransform::from_root(local),
            };
            self.worlds.insert(node, world);
            self.dirties.remove(&node);
        }

        Ok(())
    }

    fn is_ancestor(&self, ancestor: TransformKey, key: TransformKey) -> bool {
        let mut current = self.parents.get(key).copied();
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parents.get(node).copied();
        }
        false
    }

    fn attach(&mut self, child: TransformKey, parent: TransformKey) {
        if let Some(children) = self.children.get_mut(parent) {
            children.push(child);
        }
        self.parents.insert(child, parent);
    }

    // leaves the node as a root, callers handle dirtiness
    fn detach(&mut self, child: TransformKey) {
        if let Some(parent) = self.parents.remove(child) {
            if let Some(children) = self.children.get_mut(parent) {
                children.retain(|&c| c != child);
            }
        }
    }
}
