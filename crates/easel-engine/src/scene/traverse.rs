use crate::core::FrameCtx;

use super::ObjectId;

/// One traversal pass over every enabled scene, in registration order.
///
/// Per node, depth-first pre-order: behaviour `update`, behaviour `render`,
/// transform integration, enabled components, then enabled children in list
/// order. A disabled node hides its whole subtree. A failing hook is logged
/// and the pass continues with the next step.
///
/// Children are snapshotted when a node is reached; a snapshotted child that
/// was reparented elsewhere or despawned in the meantime is skipped, and
/// children added during the pass are first visited next frame.
pub(crate) fn traverse(ctx: &mut FrameCtx<'_>) {
    let scenes = ctx.tree.scenes().to_vec();
    for scene in scenes {
        visit(ctx, scene);
    }
}

fn visit(ctx: &mut FrameCtx<'_>, id: ObjectId) {
    let Some(object) = ctx.tree.get(id) else {
        return;
    };
    if !object.enabled {
        return;
    }
    if let Some(cursor) = object.cursor() {
        ctx.scene_cursor = Some(cursor);
    }

    if let Some(mut behavior) = ctx.tree.take_behavior(id) {
        if let Err(e) = behavior.update(id, ctx) {
            log::error!("{id} update failed: {e:#}");
        }
        if let Err(e) = behavior.render(id, ctx) {
            log::error!("{id} render failed: {e:#}");
        }
        ctx.tree.restore_behavior(id, behavior);
    }

    let Some(object) = ctx.tree.get_mut(id) else {
        return;
    };
    object.transform.integrate();

    let mut components = ctx.tree.take_components(id);
    for slot in components.iter_mut().filter(|s| s.enabled) {
        if let Err(e) = slot.inner.update(id, ctx) {
            log::error!("{} on {id} failed: {e:#}", slot.id());
        }
    }
    ctx.tree.restore_components(id, components);

    let children = ctx.tree.children(id).to_vec();
    for child in children {
        if ctx.tree.parent(child) == Some(id) {
            visit(ctx, child);
        }
    }
}
