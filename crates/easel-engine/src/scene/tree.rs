use std::collections::HashMap;

use crate::coords::Vector2;
use crate::error::{EngineError, Result};

use super::{Behavior, Component, ComponentId, ComponentSlot, GameObject, ObjectId, Scene};

/// Arena owning every object of the application.
///
/// Objects are addressed by [`ObjectId`]. A child list is the ownership edge
/// (ordered, insertion order); a parent link is a plain id. Scenes are the
/// traversal roots, kept in registration order.
#[derive(Default)]
pub struct SceneTree {
    objects: HashMap<ObjectId, GameObject>,
    scenes: Vec<ObjectId>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ── registration ──────────────────────────────────────────────────────

    /// Takes ownership of a detached object. Setup is deferred to the first
    /// [`set_parent`](Self::set_parent).
    pub fn spawn(&mut self, object: GameObject) -> ObjectId {
        let id = object.id();
        log::trace!("spawn {} ({id})", object.name);
        self.objects.insert(id, object);
        id
    }

    /// Spawns `object` and attaches it under `parent` in one step.
    pub fn spawn_child(&mut self, parent: ObjectId, object: GameObject) -> Result<ObjectId> {
        if !self.objects.contains_key(&parent) {
            return Err(EngineError::UnknownObject(parent));
        }
        let id = self.spawn(object);
        if let Err(e) = self.set_parent(id, parent) {
            self.objects.remove(&id);
            return Err(e);
        }
        Ok(id)
    }

    /// Registers a scene root and runs its setup.
    pub fn add_scene(&mut self, scene: Scene) -> ObjectId {
        let object = scene.into_object();
        let id = object.id();
        log::debug!("registered scene {:?} ({id})", object.name);
        self.objects.insert(id, object);
        self.scenes.push(id);
        self.run_setup(id);
        id
    }

    /// Removes an object and its whole subtree. Components go with their owners.
    pub fn despawn(&mut self, id: ObjectId) -> Result<()> {
        let parent = self.get(id).ok_or(EngineError::UnknownObject(id))?.parent;
        if let Some(parent) = parent.and_then(|p| self.objects.get_mut(&p)) {
            parent.children.retain(|&c| c != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(object) = self.objects.remove(&next) {
                stack.extend(object.children);
            }
        }
        self.scenes.retain(|&s| s != id);
        log::trace!("despawned {id}");
        Ok(())
    }

    // ── lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id)
    }

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Child ids in order. Empty for unknown objects.
    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.objects.get(&id).map(|o| o.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(&id).and_then(|o| o.parent)
    }

    /// `child` if it is a direct child of `parent`.
    pub fn find_child_by_id(&self, parent: ObjectId, child: ObjectId) -> Option<&GameObject> {
        if self.children(parent).contains(&child) {
            self.objects.get(&child)
        } else {
            None
        }
    }

    pub fn children_by_name(&self, parent: ObjectId, name: &str) -> Vec<ObjectId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|c| self.objects.get(c).is_some_and(|o| o.name == name))
            .collect()
    }

    // ── hierarchy ─────────────────────────────────────────────────────────

    /// Moves `child` under `parent`.
    ///
    /// The child leaves its old parent's list and is appended to the new one,
    /// so it is listed exactly once. Its behaviour's setup runs on the first
    /// attach only.
    pub fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> Result<()> {
        if child == parent {
            return Err(EngineError::SelfParent(child));
        }
        let object = self.objects.get(&child).ok_or(EngineError::UnknownObject(child))?;
        if object.is_scene() {
            return Err(EngineError::SceneParent(child));
        }
        if !self.objects.contains_key(&parent) {
            return Err(EngineError::UnknownObject(parent));
        }
        if self.is_ancestor(child, parent) {
            return Err(EngineError::CyclicParent { child, parent });
        }

        self.unlink(child);
        if let Some(p) = self.objects.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.objects.get_mut(&child) {
            c.parent = Some(parent);
        }
        self.run_setup(child);
        Ok(())
    }

    /// Removes `child` from its parent. The object stays alive but is no
    /// longer reached by traversal.
    pub fn detach(&mut self, child: ObjectId) -> Result<()> {
        if !self.objects.contains_key(&child) {
            return Err(EngineError::UnknownObject(child));
        }
        self.unlink(child);
        Ok(())
    }

    fn unlink(&mut self, child: ObjectId) {
        let old = self.objects.get_mut(&child).and_then(|c| c.parent.take());
        if let Some(old) = old.and_then(|p| self.objects.get_mut(&p)) {
            old.children.retain(|&c| c != child);
        }
    }

    /// True when `ancestor` is `node` or lies on `node`'s parent chain.
    fn is_ancestor(&self, ancestor: ObjectId, node: ObjectId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    /// Position after composing the parent chain.
    ///
    /// Each object with a parent contributes `scale ⊙ position`; the root
    /// contributes its raw position.
    pub fn render_position(&self, id: ObjectId) -> Result<Vector2> {
        let mut object = self.get(id).ok_or(EngineError::UnknownObject(id))?;
        let mut acc = Vector2::ORIGIN;
        loop {
            let t = &object.transform;
            match object.parent.and_then(|p| self.objects.get(&p)) {
                Some(parent) => {
                    acc += t.scale * t.position;
                    object = parent;
                }
                None => {
                    acc += t.position;
                    return Ok(acc);
                }
            }
        }
    }

    // ── scenes ────────────────────────────────────────────────────────────

    #[inline]
    pub fn scenes(&self) -> &[ObjectId] {
        &self.scenes
    }

    pub fn scene_by_name(&self, name: &str) -> Option<ObjectId> {
        self.scenes
            .iter()
            .copied()
            .find(|s| self.objects.get(s).is_some_and(|o| o.name == name))
    }

    pub fn scene(&self, name: &str) -> Result<ObjectId> {
        self.scene_by_name(name)
            .ok_or_else(|| EngineError::UnknownScene(name.to_owned()))
    }

    pub fn set_scene_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        let id = self.scene(name)?;
        if let Some(scene) = self.objects.get_mut(&id) {
            scene.enabled = enabled;
        }
        Ok(())
    }

    /// Enables the named scene and disables every other one.
    pub fn activate_scene(&mut self, name: &str) -> Result<()> {
        let target = self.scene(name)?;
        for id in &self.scenes {
            if let Some(scene) = self.objects.get_mut(id) {
                scene.enabled = *id == target;
            }
        }
        log::debug!("activated scene {name:?}");
        Ok(())
    }

    // ── behaviours ────────────────────────────────────────────────────────

    /// Replaces the behaviour of `id`. Setup does not run for a replacement.
    pub fn set_behavior(&mut self, id: ObjectId, behavior: impl Behavior) -> Result<()> {
        let object = self.objects.get_mut(&id).ok_or(EngineError::UnknownObject(id))?;
        object.behavior = Some(Box::new(behavior));
        Ok(())
    }

    pub(crate) fn take_behavior(&mut self, id: ObjectId) -> Option<Box<dyn Behavior>> {
        self.objects.get_mut(&id).and_then(|o| o.behavior.take())
    }

    /// Puts a behaviour back unless the object was despawned or given a new
    /// behaviour while this one ran.
    pub(crate) fn restore_behavior(&mut self, id: ObjectId, behavior: Box<dyn Behavior>) {
        if let Some(object) = self.objects.get_mut(&id) {
            if object.behavior.is_none() {
                object.behavior = Some(behavior);
            }
        }
    }

    fn run_setup(&mut self, id: ObjectId) {
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        if object.setup_done {
            return;
        }
        object.setup_done = true;
        let Some(mut behavior) = object.behavior.take() else {
            return;
        };
        log::trace!("setup {} ({id})", object.name);
        if let Err(e) = behavior.setup(id, self) {
            log::error!("setup of {id} failed: {e:#}");
        }
        self.restore_behavior(id, behavior);
    }

    /// Delivers `message` to every behaviour reachable from the enabled
    /// scenes, depth-first pre-order. Disabled subtrees are skipped.
    pub fn broadcast(&mut self, message: &str) {
        let mut stack: Vec<ObjectId> = self.scenes.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(object) = self.objects.get(&id) else {
                continue;
            };
            if !object.enabled {
                continue;
            }
            if let Some(mut behavior) = self.take_behavior(id) {
                if let Err(e) = behavior.on_message(id, self, message) {
                    log::error!("{id} failed to handle message: {e:#}");
                }
                self.restore_behavior(id, behavior);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
    }

    // ── components ────────────────────────────────────────────────────────

    pub fn add_component(
        &mut self,
        owner: ObjectId,
        component: impl Component,
    ) -> Result<ComponentId> {
        self.add_boxed_component(owner, Box::new(component))
    }

    pub fn add_boxed_component(
        &mut self,
        owner: ObjectId,
        component: Box<dyn Component>,
    ) -> Result<ComponentId> {
        let object = self.objects.get_mut(&owner).ok_or(EngineError::UnknownObject(owner))?;
        let slot = ComponentSlot::new(component);
        let id = slot.id();
        object.components.push(slot);
        Ok(id)
    }

    /// First component of type `T` on `owner`.
    pub fn component<T: Component>(&self, owner: ObjectId) -> Option<&T> {
        self.objects
            .get(&owner)?
            .components
            .iter()
            .find_map(|slot| slot.downcast_ref::<T>())
    }

    pub fn component_mut<T: Component>(&mut self, owner: ObjectId) -> Option<&mut T> {
        self.objects
            .get_mut(&owner)?
            .components
            .iter_mut()
            .find_map(|slot| slot.downcast_mut::<T>())
    }

    pub fn component_owner(&self, component: ComponentId) -> Option<ObjectId> {
        self.locate(component).map(|(owner, _)| owner)
    }

    pub fn set_component_enabled(&mut self, component: ComponentId, enabled: bool) -> Result<()> {
        let (owner, index) = self
            .locate(component)
            .ok_or(EngineError::UnknownComponent(component))?;
        if let Some(slot) = self.objects.get_mut(&owner).and_then(|o| o.components.get_mut(index)) {
            slot.enabled = enabled;
        }
        Ok(())
    }

    /// Moves a component to `new_owner`, keeping its id.
    pub fn move_component(&mut self, component: ComponentId, new_owner: ObjectId) -> Result<()> {
        if !self.objects.contains_key(&new_owner) {
            return Err(EngineError::UnknownObject(new_owner));
        }
        let slot = self.take_slot(component)?;
        if let Some(owner) = self.objects.get_mut(&new_owner) {
            owner.components.push(slot);
        }
        Ok(())
    }

    pub fn remove_component(&mut self, component: ComponentId) -> Result<Box<dyn Component>> {
        self.take_slot(component).map(|slot| slot.inner)
    }

    fn take_slot(&mut self, component: ComponentId) -> Result<ComponentSlot> {
        let (owner, index) = self
            .locate(component)
            .ok_or(EngineError::UnknownComponent(component))?;
        self.objects
            .get_mut(&owner)
            .map(|o| o.components.remove(index))
            .ok_or(EngineError::UnknownObject(owner))
    }

    fn locate(&self, component: ComponentId) -> Option<(ObjectId, usize)> {
        self.objects.iter().find_map(|(id, o)| {
            o.components
                .iter()
                .position(|slot| slot.id() == component)
                .map(|index| (*id, index))
        })
    }

    pub(crate) fn take_components(&mut self, id: ObjectId) -> Vec<ComponentSlot> {
        self.objects
            .get_mut(&id)
            .map(|o| std::mem::take(&mut o.components))
            .unwrap_or_default()
    }

    /// Returns taken components ahead of any added while they were out.
    pub(crate) fn restore_components(&mut self, id: ObjectId, taken: Vec<ComponentSlot>) {
        if let Some(object) = self.objects.get_mut(&id) {
            let added = std::mem::replace(&mut object.components, taken);
            object.components.extend(added);
        }
    }
}
