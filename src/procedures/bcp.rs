/*!
Boolean constraint propagation.

See [Context::bcp] for the relevant context method.

# Overview

Each literal on the trail from the head of the propagation queue is propagated in turn, until the trail is exhausted or a conflict is found.

Propagation of a literal happens in two steps, distinguished by clause length:
- First, every literal on the binary list of the literal is assigned.
- Second, the watch of every clause on the long list of the literal is updated.
  If no replacement watch is found the other watched literal of the clause is assigned, with the clause as the reason.

Binary clauses are examined first, as binary clauses require no access to the clause database and no update of watches.

On a conflict propagation stops immediately, and the conflict is recorded on the context.
The head of the queue is left on the literal whose propagation found the conflict.

# Borrowing

The long list of a literal is taken from the watches while the list is examined, as updating a watch may add to some other long list.
The list of the literal being propagated is never added to, as the negation of the literal is false and so never a replacement watch.
Still, the list is restored by [restore_long](crate::db::watches::Watches::restore_long), which keeps any additions.
*/

use crate::{
    context::Context,
    db::clause::db_clause::WatchUpdate,
    generic::stack::Stack,
    misc::log::targets::{self},
    structures::reason::Reason,
    types::err::{self},
};

impl Context {
    /// Propagates every unpropagated literal on the trail, returning false on a conflict.
    ///
    /// For documentation, see [procedures::bcp](crate::procedures::bcp).
    pub fn bcp(&mut self) -> Result<bool, err::BCPError> {
        while let Some(literal) = self.trail.literals.get(self.trail.q_head).copied() {
            // Binary clause block.
            let mut index = 0;
            while let Some(implied) = self.watches.binary(literal).get(index).copied() {
                if !self.assign(implied, Reason::Binary(-literal)) {
                    return Ok(false);
                }
                index += 1;
            }

            // Long clause block.
            let mut long_list = self.watches.take_long(literal);
            let mut index = 0;

            while let Some(key) = long_list.get(index).copied() {
                let update = match self.clause_db.get_mut(key) {
                    Ok(clause) => clause.update_watch(-literal, &self.variable_db),

                    Err(_) => {
                        log::error!(target: targets::PROPAGATION, "Watched clause {key} is missing");
                        self.watches.restore_long(literal, long_list);
                        return Err(err::BCPError::CorruptWatch);
                    }
                };

                match update {
                    Ok(WatchUpdate::Witness) => index += 1,

                    Ok(WatchUpdate::Moved(watch)) => {
                        long_list.swap_delete(index);
                        self.watches.watch_long(watch, key);
                    }

                    Ok(WatchUpdate::Asserting(asserted)) => {
                        index += 1;
                        if !self.assign(asserted, Reason::Clause(key)) {
                            self.watches.restore_long(literal, long_list);
                            return Ok(false);
                        }
                    }

                    Err(e) => {
                        log::error!(target: targets::PROPAGATION, "Corrupt watch of {key} on {literal}");
                        self.watches.restore_long(literal, long_list);
                        return Err(e);
                    }
                }
            }

            self.watches.restore_long(literal, long_list);
            self.trail.q_head += 1;
        }

        Ok(true)
    }
}
