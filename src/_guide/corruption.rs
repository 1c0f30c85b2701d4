/*!

# How Values Are Corrupted

Every generator in [`mutators`][crate::mutators] goes through the same steps:

1. The baseline is turned into a tree and [flattened][crate::flatten] into an
   ordered map from dotted paths to leaves. `{"a": [1, {"b": 2}]}` becomes
   `{"a.0": 1, "a.1.b": 2}`.

2. The corruptable entries are picked. Bools, numbers and strings are
   corruptable. Nulls and empty containers are not, and neither are body
   fields whose path mentions `file`.

3. A [`Corruption`][crate::corrupt::Corruption] enumerates combinations of
   those entries: every single entry in minimal mode, or every combination of
   a third of them otherwise, followed by one combination of all of them.

4. For each combination, the picked entries are rewritten in the
   pretty-printed text of the corruptable entries and the text is parsed
   again. Letters become the `alpha` substitution and digits the `digit`
   substitution, so `"houseId"` becomes `"aaaaaaa"` and `12` becomes `00`.

5. The corrupted entries are merged back and
   [unflattened][crate::unflatten] into a tree.

Rewriting text rather than values keeps everything the combination did not
pick byte-for-byte identical, and keeps corrupted numbers numeric:

```
use badbatch::{mutators as m, Corrupt};
use serde_json::json;

let bodies = m::bad_bodies().corrupt(&json!({"price": 12.5, "upload_file": "a.png"}))?;

// The file field is never touched; the price keeps its shape.
assert_eq!(bodies, [json!({"price": 0.0, "upload_file": "a.png"})]);
# Ok::<(), badbatch::Error>(())
```

## Substitutions

The default substitutions, `a` and `0`, produce values that are well-formed but
refer to nothing, which a server should answer with `404`. The
[`invalid`][crate::corrupt::Substitutions::invalid] substitutions, `aaa` and
`999`, also change lengths and magnitudes, which a server should reject with
`400`.

## Corrupted Keys

With `corrupt_keys(true)`, every combination that does not cover all entries
also yields a variant whose picked *keys* have their letters replaced by `a`.
When a renamed key collides with the structure around it the variant cannot
be rebuilt and is skipped:

```
use badbatch::{mutators as m, Corrupt};
use serde_json::json;

let bodies = m::bad_bodies()
    .corrupt_keys(true)
    .corrupt(&json!({"id": "x1"}))?;

assert_eq!(bodies, [json!({"id": "a0"})]);

let bodies = m::bad_bodies()
    .corrupt_keys(true)
    .corrupt(&json!({"id": "x1", "name": "bob"}))?;

assert!(bodies.contains(&json!({"aa": "x1", "name": "bob"})));
# Ok::<(), badbatch::Error>(())
```

 */
